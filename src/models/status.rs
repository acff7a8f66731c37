use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

// Status enums mirror the backend's lowercase string values. Unrecognised
// values decode to `Unknown` so a single odd record never fails a whole list.

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString,
    EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum CourseStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Draft,
    #[serde(other)]
    Unknown,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString,
    EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum PublishStatus {
    #[default]
    Draft,
    Published,
    Active,
    Inactive,
    Archived,
    #[serde(other)]
    Unknown,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString,
    EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
    Refunded,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString,
    EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum LiveClassStatus {
    #[default]
    Scheduled,
    Live,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString,
    EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum LessonType {
    #[default]
    Video,
    Article,
    Quiz,
    Assignment,
    #[serde(other)]
    Unknown,
}

/// Known values of a status enum, for filter dropdowns and forms.
pub(crate) fn known_values<E>() -> Vec<String>
where
    E: strum::IntoEnumIterator + AsRef<str>,
{
    E::iter()
        .map(|e| e.as_ref().to_string())
        .filter(|s| s != "unknown")
        .collect()
}
