use super::{date_bucket, Ref, Resource};
use crate::view_model::Facet;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub description: String,
    #[serde(default)]
    pub parent_category: Option<Ref>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "super::null_default")]
    pub created_at: String,
}

impl Resource for Category {
    const COLLECTION: &'static str = "categories";
    const LABEL: &'static str = "Category";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.slug.as_str(), self.description.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<String> {
        match facet {
            Facet::Status => Some(if self.is_active { "active" } else { "inactive" }.to_string()),
            Facet::Type => Some(
                if self.parent_category.is_some() { "subcategory" } else { "root" }.to_string(),
            ),
            Facet::Date => date_bucket(&self.created_at),
            Facet::Category => self.parent_category.as_ref().map(|p| p.id().to_string()),
            Facet::Platform => None,
        }
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_category.as_ref().map(|p| p.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_defaults_to_active_root() {
        let c: Category =
            serde_json::from_str(r#"{"_id": "c1", "name": "Design"}"#).expect("should parse");
        assert!(c.is_active);
        assert_eq!(c.parent_id(), None);
        assert_eq!(c.facet(Facet::Type).as_deref(), Some("root"));
    }

    #[test]
    fn test_category_parent_reference() {
        let c: Category = serde_json::from_str(
            r#"{"_id": "c2", "name": "UI", "parentCategory": {"_id": "c1", "name": "Design"}, "isActive": false}"#,
        )
        .expect("should parse");
        assert_eq!(c.parent_id(), Some("c1"));
        assert_eq!(c.facet(Facet::Status).as_deref(), Some("inactive"));
    }
}
