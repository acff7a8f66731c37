use leptos::prelude::*;
use strum::{AsRefStr, Display};
use tw_merge::tw_merge;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr)]
pub enum BadgeTone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

impl BadgeTone {
    fn class(self) -> &'static str {
        match self {
            BadgeTone::Neutral => "bg-muted text-muted-foreground",
            BadgeTone::Success => "bg-green-100 text-green-800",
            BadgeTone::Warning => "bg-amber-100 text-amber-800",
            BadgeTone::Danger => "bg-red-100 text-red-800",
            BadgeTone::Info => "bg-blue-100 text-blue-800",
        }
    }

    /// Tone for a backend status value such as `approved` or `cancelled`.
    pub fn for_status(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "approved" | "published" | "active" | "completed" | "live" => BadgeTone::Success,
            "pending" | "processing" | "draft" | "scheduled" => BadgeTone::Warning,
            "rejected" | "cancelled" | "failed" | "inactive" | "refunded" => BadgeTone::Danger,
            "archived" => BadgeTone::Neutral,
            _ => BadgeTone::Info,
        }
    }
}

#[component]
pub fn Badge(
    #[prop(optional)] tone: BadgeTone,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!(
        "inline-flex items-center rounded-full px-2 py-0.5 text-xs font-medium capitalize",
        tone.class(),
        class
    );

    view! { <span data-name="Badge" data-tone=tone.as_ref().to_string() class=class>{children()}</span> }
}

#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    let tone = BadgeTone::for_status(&status);
    view! { <Badge tone=tone>{status}</Badge> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tones() {
        assert_eq!(BadgeTone::for_status("Approved"), BadgeTone::Success);
        assert_eq!(BadgeTone::for_status("pending"), BadgeTone::Warning);
        assert_eq!(BadgeTone::for_status("refunded"), BadgeTone::Danger);
        assert_eq!(BadgeTone::for_status("mystery"), BadgeTone::Info);
    }
}
