use super::{date_bucket, PublishStatus, Resource};
use crate::view_model::Facet;
use serde::{Deserialize, Serialize};

/// A ready-made website listed for sale.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Website {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub description: String,
    #[serde(default, rename = "type")]
    pub website_type: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub platform: String,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "super::null_default")]
    pub status: PublishStatus,
    #[serde(default, deserialize_with = "super::null_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "super::null_default")]
    pub sales: u64,
    #[serde(default, deserialize_with = "super::null_default")]
    pub created_at: String,
}

impl Resource for Website {
    const COLLECTION: &'static str = "websites";
    const LABEL: &'static str = "Website";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        if let Some(url) = &self.live_url {
            fields.push(url.as_str());
        }
        fields
    }

    fn facet(&self, facet: Facet) -> Option<String> {
        match facet {
            Facet::Status => Some(self.status.to_string()),
            Facet::Type => Some(self.website_type.clone()),
            Facet::Platform => Some(self.platform.clone()),
            Facet::Date => date_bucket(&self.created_at),
            Facet::Category => None,
        }
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }

    fn rating(&self) -> Option<f64> {
        Some(self.rating)
    }

    fn popularity(&self) -> Option<u64> {
        Some(self.sales)
    }
}
