use super::{date_bucket, LiveClassStatus, Ref, Resource};
use crate::view_model::Facet;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LiveClass {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub description: String,
    #[serde(default)]
    pub instructor: Option<Ref>,
    #[serde(default)]
    pub course: Option<Ref>,
    /// zoom / google-meet / ...
    #[serde(default, deserialize_with = "super::null_default")]
    pub platform: String,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub start_time: String,
    /// Minutes.
    #[serde(default, deserialize_with = "super::null_default")]
    pub duration: u32,
    #[serde(default, deserialize_with = "super::null_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "super::null_default")]
    pub max_participants: u32,
    #[serde(default, deserialize_with = "super::null_default")]
    pub enrolled_count: u64,
    #[serde(default, deserialize_with = "super::null_default")]
    pub status: LiveClassStatus,
    #[serde(default, deserialize_with = "super::null_default")]
    pub created_at: String,
}

impl LiveClass {
    pub fn seats_left(&self) -> Option<u64> {
        if self.max_participants == 0 {
            return None;
        }
        Some(u64::from(self.max_participants).saturating_sub(self.enrolled_count))
    }
}

impl Resource for LiveClass {
    const COLLECTION: &'static str = "live-classes";
    const LABEL: &'static str = "Live class";

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
            Facet::Platform => Some(self.platform.clone()),
            Facet::Date => date_bucket(&self.start_time),
            Facet::Category => self.course.as_ref().map(|c| c.id().to_string()),
            Facet::Type => None,
        }
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }

    fn popularity(&self) -> Option<u64> {
        Some(self.enrolled_count)
    }
}
