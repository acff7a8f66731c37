//! How each admin resource is shown: table columns, form fields and filter
//! dropdowns. The list page is generic over this trait.

use crate::components::{Cell, FacetFilter, FieldKind, FormField};
use crate::controller::{ControllerConfig, RemovePolicy};
use crate::models::{
    known_values, Category, Course, CourseModule, CourseStatus, DesignTemplate, Lesson,
    LessonType, LiveClass, LiveClassStatus, Order, OrderStatus, PublishStatus, Ref, Resource,
    Website,
};
use crate::util::{format_currency, format_date, truncate};
use crate::view_model::{Facet, SortKey, ViewMode};

pub(crate) trait AdminResource: Resource {
    /// Plural heading, e.g. "Courses".
    const TITLE: &'static str;

    fn columns() -> Vec<&'static str>;

    fn cells(&self, currency: &str) -> Vec<Cell>;

    /// Empty for read-only resources.
    fn form_fields() -> Vec<FormField> {
        Vec::new()
    }

    /// Filter dropdowns; options may depend on the loaded records.
    fn facet_filters(records: &[Self]) -> Vec<FacetFilter>;

    fn sort_keys() -> Vec<SortKey> {
        Vec::new()
    }

    fn view_modes() -> Vec<ViewMode> {
        vec![ViewMode::List, ViewMode::Grid]
    }

    fn can_create() -> bool {
        !Self::form_fields().is_empty()
    }

    fn controller_config() -> ControllerConfig {
        ControllerConfig::admin::<Self>()
    }
}

fn status_filter<E>() -> FacetFilter
where
    E: strum::IntoEnumIterator + AsRef<str>,
{
    FacetFilter::plain(Facet::Status, "Status", known_values::<E>())
}

fn observed_values<R: Resource>(records: &[R], facet: Facet, label: &'static str) -> FacetFilter {
    FacetFilter::observed(
        facet,
        label,
        records
            .iter()
            .filter_map(|r| r.facet(facet))
            .map(|v| (v.clone(), v)),
    )
}

fn observed_refs<'a, R: 'a>(
    records: &'a [R],
    facet: Facet,
    label: &'static str,
    get: impl Fn(&'a R) -> Option<&'a Ref>,
) -> FacetFilter {
    FacetFilter::observed(
        facet,
        label,
        records
            .iter()
            .filter_map(get)
            .map(|r| (r.id().to_string(), r.label().to_string())),
    )
}

fn ref_label(r: &Option<Ref>) -> String {
    r.as_ref().map(|r| r.label().to_string()).unwrap_or_else(|| "-".to_string())
}

fn yes_no(b: bool) -> String {
    if b { "Yes" } else { "No" }.to_string()
}

fn choices<E>() -> FieldKind
where
    E: strum::IntoEnumIterator + AsRef<str>,
{
    FieldKind::Choice(known_values::<E>())
}

impl AdminResource for Course {
    const TITLE: &'static str = "Courses";

    fn columns() -> Vec<&'static str> {
        vec!["Title", "Instructor", "Category", "Price", "Enrollments", "Status"]
    }

    fn cells(&self, currency: &str) -> Vec<Cell> {
        vec![
            Cell::text(truncate(&self.title, 48)),
            Cell::text(ref_label(&self.instructor)),
            Cell::text(ref_label(&self.category)),
            Cell::text(format_currency(self.effective_price(), currency)),
            Cell::text(self.total_enrollments.to_string()),
            Cell::Status(self.status.to_string()),
        ]
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("title", "Title", FieldKind::Text).required(),
            FormField::new("slug", "Slug", FieldKind::Text),
            FormField::new("description", "Description", FieldKind::LongText),
            FormField::new("price", "Price", FieldKind::Number).required(),
            FormField::new("discountPrice", "Discount price", FieldKind::Number),
            FormField::new("category", "Category id", FieldKind::Text),
            FormField::new(
                "level",
                "Level",
                FieldKind::Choice(vec![
                    "beginner".to_string(),
                    "intermediate".to_string(),
                    "advanced".to_string(),
                ]),
            ),
            FormField::new("status", "Status", choices::<CourseStatus>()),
            FormField::new("thumbnail", "Thumbnail URL", FieldKind::Url),
        ]
    }

    fn facet_filters(records: &[Self]) -> Vec<FacetFilter> {
        vec![
            status_filter::<CourseStatus>(),
            observed_values(records, Facet::Type, "Level"),
            observed_refs(records, Facet::Category, "Category", |c| c.category.as_ref()),
        ]
    }

    fn sort_keys() -> Vec<SortKey> {
        vec![
            SortKey::Default,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::RatingDesc,
            SortKey::PopularityDesc,
        ]
    }
}

impl AdminResource for Category {
    const TITLE: &'static str = "Categories";

    fn columns() -> Vec<&'static str> {
        vec!["Name", "Slug", "Parent", "Active", "Created"]
    }

    fn cells(&self, _currency: &str) -> Vec<Cell> {
        vec![
            Cell::text(self.name.clone()),
            Cell::text(self.slug.clone()),
            Cell::text(ref_label(&self.parent_category)),
            Cell::Status(if self.is_active { "active" } else { "inactive" }.to_string()),
            Cell::text(format_date(&self.created_at)),
        ]
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("slug", "Slug", FieldKind::Text),
            FormField::new("description", "Description", FieldKind::LongText),
            FormField::new("parentCategory", "Parent category id", FieldKind::Text),
            FormField::new("isActive", "Active", FieldKind::Checkbox),
        ]
    }

    fn facet_filters(_records: &[Self]) -> Vec<FacetFilter> {
        vec![
            FacetFilter::plain(
                Facet::Status,
                "Status",
                vec!["active".to_string(), "inactive".to_string()],
            ),
            FacetFilter::plain(
                Facet::Type,
                "Level",
                vec!["root".to_string(), "subcategory".to_string()],
            ),
        ]
    }

    fn view_modes() -> Vec<ViewMode> {
        vec![ViewMode::List, ViewMode::Tree]
    }
}

impl AdminResource for Lesson {
    const TITLE: &'static str = "Lessons";

    // Nothing else on the page depends on a deleted lesson.
    fn controller_config() -> ControllerConfig {
        ControllerConfig::admin::<Self>().with_remove_policy(RemovePolicy::LocalSplice)
    }

    fn columns() -> Vec<&'static str> {
        vec!["#", "Title", "Course", "Type", "Duration", "Free", "Status"]
    }

    fn cells(&self, _currency: &str) -> Vec<Cell> {
        vec![
            Cell::text(self.order.to_string()),
            Cell::text(truncate(&self.title, 48)),
            Cell::text(ref_label(&self.course)),
            Cell::text(self.lesson_type.to_string()),
            Cell::text(format!("{} min", self.duration)),
            Cell::text(yes_no(self.is_free)),
            Cell::Status(if self.is_published { "published" } else { "draft" }.to_string()),
        ]
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("title", "Title", FieldKind::Text).required(),
            FormField::new("course", "Course id", FieldKind::Text).required(),
            FormField::new("module", "Module id", FieldKind::Text),
            FormField::new("lessonType", "Type", choices::<LessonType>()),
            FormField::new("duration", "Duration (min)", FieldKind::Number),
            FormField::new("order", "Order", FieldKind::Number),
            FormField::new("videoUrl", "Video URL", FieldKind::Url),
            FormField::new("description", "Description", FieldKind::LongText),
            FormField::new("isFree", "Free preview", FieldKind::Checkbox),
            FormField::new("isPublished", "Published", FieldKind::Checkbox),
        ]
    }

    fn facet_filters(records: &[Self]) -> Vec<FacetFilter> {
        vec![
            FacetFilter::plain(
                Facet::Status,
                "Status",
                vec!["published".to_string(), "draft".to_string()],
            ),
            FacetFilter::plain(Facet::Type, "Type", known_values::<LessonType>()),
            observed_refs(records, Facet::Category, "Course", |l| l.course.as_ref()),
        ]
    }
}

impl AdminResource for CourseModule {
    const TITLE: &'static str = "Modules";

    fn columns() -> Vec<&'static str> {
        vec!["#", "Title", "Course", "Lessons", "Status"]
    }

    fn cells(&self, _currency: &str) -> Vec<Cell> {
        vec![
            Cell::text(self.order.to_string()),
            Cell::text(truncate(&self.title, 48)),
            Cell::text(ref_label(&self.course)),
            Cell::text(self.lessons.len().to_string()),
            Cell::Status(if self.is_published { "published" } else { "draft" }.to_string()),
        ]
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("title", "Title", FieldKind::Text).required(),
            FormField::new("course", "Course id", FieldKind::Text).required(),
            FormField::new("order", "Order", FieldKind::Number),
            FormField::new("description", "Description", FieldKind::LongText),
            FormField::new("isPublished", "Published", FieldKind::Checkbox),
        ]
    }

    fn facet_filters(records: &[Self]) -> Vec<FacetFilter> {
        vec![
            FacetFilter::plain(
                Facet::Status,
                "Status",
                vec!["published".to_string(), "draft".to_string()],
            ),
            observed_refs(records, Facet::Category, "Course", |m| m.course.as_ref()),
        ]
    }

    fn sort_keys() -> Vec<SortKey> {
        vec![SortKey::Default, SortKey::PopularityDesc]
    }
}

impl AdminResource for DesignTemplate {
    const TITLE: &'static str = "Design templates";

    fn columns() -> Vec<&'static str> {
        vec!["Name", "Type", "Platform", "Price", "Downloads", "Status"]
    }

    fn cells(&self, currency: &str) -> Vec<Cell> {
        vec![
            Cell::text(truncate(&self.name, 48)),
            Cell::text(self.template_type.clone()),
            Cell::text(self.platform.clone()),
            Cell::text(format_currency(self.price, currency)),
            Cell::text(self.downloads.to_string()),
            Cell::Status(self.status.to_string()),
        ]
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("type", "Type", FieldKind::Text).required(),
            FormField::new("platform", "Platform", FieldKind::Text).required(),
            FormField::new("price", "Price", FieldKind::Number).required(),
            FormField::new("previewUrl", "Preview URL", FieldKind::Url),
            FormField::new("description", "Description", FieldKind::LongText),
            FormField::new("status", "Status", choices::<PublishStatus>()),
        ]
    }

    fn facet_filters(records: &[Self]) -> Vec<FacetFilter> {
        vec![
            status_filter::<PublishStatus>(),
            observed_values(records, Facet::Type, "Type"),
            observed_values(records, Facet::Platform, "Platform"),
        ]
    }

    fn sort_keys() -> Vec<SortKey> {
        vec![
            SortKey::Default,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::RatingDesc,
            SortKey::PopularityDesc,
        ]
    }
}

impl AdminResource for Website {
    const TITLE: &'static str = "Websites";

    fn columns() -> Vec<&'static str> {
        vec!["Title", "Type", "Platform", "Price", "Sales", "Live", "Status"]
    }

    fn cells(&self, currency: &str) -> Vec<Cell> {
        let live = match &self.live_url {
            Some(url) if !url.trim().is_empty() => Cell::Link {
                href: url.clone(),
                label: "Open".to_string(),
            },
            _ => Cell::text("-"),
        };
        vec![
            Cell::text(truncate(&self.title, 48)),
            Cell::text(self.website_type.clone()),
            Cell::text(self.platform.clone()),
            Cell::text(format_currency(self.price, currency)),
            Cell::text(self.sales.to_string()),
            live,
            Cell::Status(self.status.to_string()),
        ]
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("title", "Title", FieldKind::Text).required(),
            FormField::new("type", "Type", FieldKind::Text).required(),
            FormField::new("platform", "Platform", FieldKind::Text).required(),
            FormField::new("price", "Price", FieldKind::Number).required(),
            FormField::new("liveUrl", "Live URL", FieldKind::Url),
            FormField::new("description", "Description", FieldKind::LongText),
            FormField::new("status", "Status", choices::<PublishStatus>()),
        ]
    }

    fn facet_filters(records: &[Self]) -> Vec<FacetFilter> {
        vec![
            status_filter::<PublishStatus>(),
            observed_values(records, Facet::Type, "Type"),
            observed_values(records, Facet::Platform, "Platform"),
        ]
    }

    fn sort_keys() -> Vec<SortKey> {
        vec![
            SortKey::Default,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::RatingDesc,
            SortKey::PopularityDesc,
        ]
    }
}

impl AdminResource for LiveClass {
    const TITLE: &'static str = "Live classes";

    fn columns() -> Vec<&'static str> {
        vec!["Title", "Instructor", "Platform", "Starts", "Seats left", "Price", "Status"]
    }

    fn cells(&self, currency: &str) -> Vec<Cell> {
        vec![
            Cell::text(truncate(&self.title, 48)),
            Cell::text(ref_label(&self.instructor)),
            Cell::text(self.platform.clone()),
            Cell::text(format_date(&self.start_time)),
            Cell::text(
                self.seats_left()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::text(format_currency(self.price, currency)),
            Cell::Status(self.status.to_string()),
        ]
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("title", "Title", FieldKind::Text).required(),
            FormField::new("course", "Course id", FieldKind::Text),
            FormField::new("platform", "Platform", FieldKind::Text).required(),
            FormField::new("meetingLink", "Meeting link", FieldKind::Url),
            FormField::new("startTime", "Starts at", FieldKind::DateTime).required(),
            FormField::new("duration", "Duration (min)", FieldKind::Number),
            FormField::new("price", "Price", FieldKind::Number),
            FormField::new("maxParticipants", "Max participants", FieldKind::Number),
            FormField::new("status", "Status", choices::<LiveClassStatus>()),
            FormField::new("description", "Description", FieldKind::LongText),
        ]
    }

    fn facet_filters(records: &[Self]) -> Vec<FacetFilter> {
        vec![
            status_filter::<LiveClassStatus>(),
            observed_values(records, Facet::Platform, "Platform"),
            observed_values(records, Facet::Date, "Date"),
        ]
    }

    fn sort_keys() -> Vec<SortKey> {
        vec![SortKey::Default, SortKey::PriceAsc, SortKey::PriceDesc]
    }
}

impl AdminResource for Order {
    const TITLE: &'static str = "Orders";

    fn columns() -> Vec<&'static str> {
        vec!["Order", "Customer", "Items", "Total", "Payment", "Date", "Status"]
    }

    fn cells(&self, currency: &str) -> Vec<Cell> {
        vec![
            Cell::text(truncate(&self.id, 10)),
            Cell::text(self.customer().to_string()),
            Cell::text(self.items.len().to_string()),
            Cell::text(format_currency(self.total_amount, currency)),
            Cell::text(self.payment_method.clone()),
            Cell::text(format_date(&self.created_at)),
            Cell::Status(self.status.to_string()),
        ]
    }

    /// Orders are placed by customers; admins only move them between states.
    fn form_fields() -> Vec<FormField> {
        vec![FormField::new("status", "Status", choices::<OrderStatus>()).required()]
    }

    fn facet_filters(records: &[Self]) -> Vec<FacetFilter> {
        vec![
            status_filter::<OrderStatus>(),
            observed_values(records, Facet::Type, "Item type"),
            observed_values(records, Facet::Platform, "Payment"),
        ]
    }

    fn sort_keys() -> Vec<SortKey> {
        vec![SortKey::Default, SortKey::PriceDesc, SortKey::PriceAsc]
    }

    fn view_modes() -> Vec<ViewMode> {
        Vec::new()
    }

    fn can_create() -> bool {
        false
    }
}
