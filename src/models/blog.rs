use super::{date_bucket, PublishStatus, Ref, Resource};
use crate::view_model::Facet;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BlogPost {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub excerpt: String,
    #[serde(default)]
    pub author: Option<Ref>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub category: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub status: PublishStatus,
    #[serde(default, deserialize_with = "super::null_default")]
    pub views: u64,
    #[serde(default, deserialize_with = "super::null_default")]
    pub created_at: String,
}

impl Resource for BlogPost {
    const COLLECTION: &'static str = "blogs";
    const LABEL: &'static str = "Blog post";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.excerpt.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn facet(&self, facet: Facet) -> Option<String> {
        match facet {
            Facet::Status => Some(self.status.to_string()),
            Facet::Category => Some(self.category.clone()),
            Facet::Date => date_bucket(&self.created_at),
            Facet::Type | Facet::Platform => None,
        }
    }

    fn popularity(&self) -> Option<u64> {
        Some(self.views)
    }
}
