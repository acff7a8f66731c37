use super::{date_bucket, CourseStatus, Ref, Resource};
use crate::view_model::Facet;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Course {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub description: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub category: Option<Ref>,
    #[serde(default)]
    pub instructor: Option<Ref>,
    /// beginner / intermediate / advanced; free-form on the backend.
    #[serde(default, deserialize_with = "super::null_default")]
    pub level: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub status: CourseStatus,
    #[serde(default, deserialize_with = "super::null_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "super::null_default")]
    pub total_enrollments: u64,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub created_at: String,
}

impl Course {
    /// Price a buyer actually pays.
    pub fn effective_price(&self) -> f64 {
        match self.discount_price {
            Some(d) if d > 0.0 && d < self.price => d,
            _ => self.price,
        }
    }
}

impl Resource for Course {
    const COLLECTION: &'static str = "courses";
    const LABEL: &'static str = "Course";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        if let Some(instructor) = &self.instructor {
            fields.push(instructor.label());
        }
        fields
    }

    fn facet(&self, facet: Facet) -> Option<String> {
        match facet {
            Facet::Status => Some(self.status.to_string()),
            Facet::Type => Some(self.level.clone()),
            Facet::Category => self.category.as_ref().map(|c| c.id().to_string()),
            Facet::Date => date_bucket(&self.created_at),
            Facet::Platform => None,
        }
    }

    fn price(&self) -> Option<f64> {
        Some(self.effective_price())
    }

    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }

    fn popularity(&self) -> Option<u64> {
        Some(self.total_enrollments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_contract_deserialize() {
        let json = r#"{
            "_id": "c1",
            "title": "Intro to Rust",
            "price": 200,
            "discountPrice": 150,
            "category": {"_id": "cat1", "name": "Programming"},
            "instructor": "u7",
            "status": "approved",
            "totalEnrollments": 42,
            "createdAt": "2024-03-09T08:00:00.000Z"
        }"#;
        let c: Course = serde_json::from_str(json).expect("course should parse");
        assert_eq!(c.id, "c1");
        assert_eq!(c.effective_price(), 150.0);
        assert_eq!(c.facet(Facet::Category).as_deref(), Some("cat1"));
        assert_eq!(c.facet(Facet::Status).as_deref(), Some("approved"));
        assert_eq!(c.facet(Facet::Date).as_deref(), Some("2024-03-09"));
        assert_eq!(c.popularity(), Some(42));
    }

    #[test]
    fn test_effective_price_ignores_invalid_discount() {
        let json = r#"{"id": "c2", "title": "t", "price": 100, "discountPrice": 0}"#;
        let c: Course = serde_json::from_str(json).expect("should parse");
        assert_eq!(c.effective_price(), 100.0);
    }
}
