use super::{date_bucket, LessonType, Ref, Resource};
use crate::view_model::Facet;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Lesson {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub description: String,
    #[serde(default)]
    pub course: Option<Ref>,
    #[serde(default)]
    pub module: Option<Ref>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub lesson_type: LessonType,
    /// Minutes.
    #[serde(default, deserialize_with = "super::null_default")]
    pub duration: u32,
    #[serde(default, deserialize_with = "super::null_default")]
    pub order: u32,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub is_free: bool,
    #[serde(default, deserialize_with = "super::null_default")]
    pub is_published: bool,
    #[serde(default, deserialize_with = "super::null_default")]
    pub created_at: String,
}

impl Resource for Lesson {
    const COLLECTION: &'static str = "lessons";
    const LABEL: &'static str = "Lesson";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        if let Some(course) = &self.course {
            fields.push(course.label());
        }
        fields
    }

    fn facet(&self, facet: Facet) -> Option<String> {
        match facet {
            Facet::Status => {
                Some(if self.is_published { "published" } else { "draft" }.to_string())
            }
            Facet::Type => Some(self.lesson_type.to_string()),
            Facet::Category => self.course.as_ref().map(|c| c.id().to_string()),
            Facet::Date => date_bucket(&self.created_at),
            Facet::Platform => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_contract_deserialize() {
        let json = r#"{
            "_id": "l1",
            "title": "Ownership",
            "course": {"_id": "c1", "title": "Intro to Rust"},
            "module": "m1",
            "lessonType": "video",
            "duration": 12,
            "isPublished": true
        }"#;
        let l: Lesson = serde_json::from_str(json).expect("lesson should parse");
        assert_eq!(l.lesson_type, LessonType::Video);
        assert_eq!(l.module.as_ref().map(|m| m.id()), Some("m1"));
        assert!(l.search_fields().contains(&"Intro to Rust"));
        assert_eq!(l.facet(Facet::Status).as_deref(), Some("published"));
    }
}
