mod account;
mod blog;
mod category;
mod course;
mod design_template;
mod lesson;
mod live_class;
mod module;
mod order;
mod status;
mod website;

pub(crate) use account::{AccountInfo, LoginRequest, LoginResponse};
pub(crate) use blog::BlogPost;
pub(crate) use category::Category;
pub(crate) use course::Course;
pub(crate) use design_template::DesignTemplate;
pub(crate) use lesson::Lesson;
pub(crate) use live_class::LiveClass;
pub(crate) use module::CourseModule;
pub(crate) use order::Order;
pub(crate) use status::{
    known_values, CourseStatus, LessonType, LiveClassStatus, OrderStatus, PublishStatus,
};
pub(crate) use website::Website;

use crate::view_model::Facet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Reference to another backend record.
///
/// Endpoints return either the bare id or the populated document depending
/// on whether the backend joined it, so both shapes are accepted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub(crate) enum Ref {
    Id(String),
    Populated(RecordSummary),
}

impl Ref {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(summary) => &summary.id,
        }
    }

    /// Human-readable label, falling back to the id when not populated.
    pub fn label(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(summary) if !summary.label.trim().is_empty() => &summary.label,
            Ref::Populated(summary) => &summary.id,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Ref::Id(_) => None,
            Ref::Populated(summary) => summary.email.as_deref(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct RecordSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(default, alias = "title", alias = "name")]
    pub label: String,

    #[serde(default)]
    pub email: Option<String>,
}

/// A backend-owned record type mirrored by a list page.
///
/// Implementors describe where the collection lives and which fields the
/// view model may filter, sort and search on.
pub(crate) trait Resource:
    Clone + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Path segment of the collection, e.g. `courses`.
    const COLLECTION: &'static str;
    /// Singular display name, e.g. `Course`.
    const LABEL: &'static str;

    fn id(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Fields matched by the free-text query.
    fn search_fields(&self) -> Vec<&str>;

    fn facet(&self, _facet: Facet) -> Option<String> {
        None
    }

    fn price(&self) -> Option<f64> {
        None
    }

    fn rating(&self) -> Option<f64> {
        None
    }

    fn popularity(&self) -> Option<u64> {
        None
    }

    /// Parent record id for hierarchical collections.
    fn parent_id(&self) -> Option<&str> {
        None
    }

    fn list_path() -> String {
        format!("/{}/admin/all", Self::COLLECTION)
    }

    fn public_list_path() -> String {
        format!("/{}", Self::COLLECTION)
    }

    fn create_path() -> String {
        format!("/{}/create", Self::COLLECTION)
    }

    fn admin_item_path(id: &str) -> String {
        format!("/{}/admin/{}", Self::COLLECTION, urlencoding::encode(id))
    }
}

/// `YYYY-MM-DD` prefix of an ISO timestamp, used for the date facet.
pub(crate) fn date_bucket(timestamp: &str) -> Option<String> {
    let t = timestamp.trim();
    if t.len() < 10 || !t.is_char_boundary(10) {
        return None;
    }
    Some(t[..10].to_string())
}

/// Decode `null` like a missing field.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
