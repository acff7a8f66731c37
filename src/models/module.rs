use super::{date_bucket, Ref, Resource};
use crate::view_model::Facet;
use serde::{Deserialize, Serialize};

/// A chapter grouping lessons inside a course.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CourseModule {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub description: String,
    #[serde(default)]
    pub course: Option<Ref>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub order: u32,
    #[serde(default, deserialize_with = "super::null_default")]
    pub lessons: Vec<Ref>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub is_published: bool,
    #[serde(default, deserialize_with = "super::null_default")]
    pub created_at: String,
}

impl Resource for CourseModule {
    const COLLECTION: &'static str = "modules";
    const LABEL: &'static str = "Module";

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
            Facet::Category => self.course.as_ref().map(|c| c.id().to_string()),
            Facet::Date => date_bucket(&self.created_at),
            Facet::Type | Facet::Platform => None,
        }
    }

    fn popularity(&self) -> Option<u64> {
        Some(self.lessons.len() as u64)
    }
}
