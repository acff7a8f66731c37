use super::{date_bucket, PublishStatus, Ref, Resource};
use crate::view_model::Facet;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DesignTemplate {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub description: String,
    /// landing-page / ecommerce / portfolio ...
    #[serde(default, rename = "type")]
    pub template_type: String,
    /// figma / wordpress / html ...
    #[serde(default, deserialize_with = "super::null_default")]
    pub platform: String,
    #[serde(default)]
    pub category: Option<Ref>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "super::null_default")]
    pub status: PublishStatus,
    #[serde(default, deserialize_with = "super::null_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "super::null_default")]
    pub downloads: u64,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub created_at: String,
}

impl Resource for DesignTemplate {
    const COLLECTION: &'static str = "design-templates";
    const LABEL: &'static str = "Design template";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str(), self.platform.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<String> {
        match facet {
            Facet::Status => Some(self.status.to_string()),
            Facet::Type => Some(self.template_type.clone()),
            Facet::Platform => Some(self.platform.clone()),
            Facet::Category => self.category.as_ref().map(|c| c.id().to_string()),
            Facet::Date => date_bucket(&self.created_at),
        }
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }

    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }

    fn popularity(&self) -> Option<u64> {
        Some(self.downloads)
    }
}
