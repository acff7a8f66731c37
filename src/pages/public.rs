use crate::components::ui::{
    Badge, BadgeTone, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardFooter, CardHeader, CardTitle, ErrorBanner, LoadingState,
};
use crate::components::{FacetFilter, FilterBar, Pagination};
use crate::config::{CATALOG_PAGE_SIZE, GRID_PAGE_SIZE};
use crate::controller::{ControllerConfig, ListController};
use crate::models::{BlogPost, Course, Resource};
use crate::pages::{bind_snapshot, filter_actions};
use crate::state::AppContext;
use crate::util::{format_currency, format_date, truncate};
use crate::view_model::{Facet, SortKey};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub(crate) fn course_category_filter(courses: &[Course]) -> FacetFilter {
    FacetFilter::observed(
        Facet::Category,
        "Category",
        courses
            .iter()
            .filter_map(|c| c.category.as_ref())
            .map(|r| (r.id().to_string(), r.label().to_string())),
    )
}

pub(crate) fn blog_category_filter(posts: &[BlogPost]) -> FacetFilter {
    FacetFilter::observed(
        Facet::Category,
        "Category",
        posts.iter().map(|p| (p.category.clone(), p.category.clone())),
    )
}

/// Public lists load anonymously; failures stay on the page.
fn public_controller<R: Resource>(page_size: usize) -> ListController<R> {
    let app_state = expect_context::<AppContext>();
    let controller = ListController::new(
        app_state.0.api_client.clone(),
        ControllerConfig::public::<R>(page_size),
    );
    let c = controller.clone();
    spawn_local(async move {
        c.refresh().await;
    });
    controller
}

#[component]
fn PublicHeader() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_admin = move || {
        app_state
            .0
            .current_user
            .with(|u| u.as_ref().map(|u| u.is_admin()).unwrap_or(false))
    };

    view! {
        <header class="border-b bg-background">
            <div class="mx-auto flex h-14 w-full max-w-6xl items-center justify-between px-4">
                <a href="/" class="text-sm font-semibold">"LearnHub"</a>
                <nav class="flex items-center gap-1">
                    <Button href="/courses" variant=ButtonVariant::Ghost size=ButtonSize::Sm>
                        "Courses"
                    </Button>
                    <Button href="/blogs" variant=ButtonVariant::Ghost size=ButtonSize::Sm>
                        "Blog"
                    </Button>
                    <Show
                        when=is_admin
                        fallback=|| view! {
                            <Button href="/login" variant=ButtonVariant::Outline size=ButtonSize::Sm>
                                "Log in"
                            </Button>
                        }
                    >
                        <Button href="/admin" variant=ButtonVariant::Outline size=ButtonSize::Sm>
                            "Admin"
                        </Button>
                    </Show>
                </nav>
            </div>
        </header>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background">
            <PublicHeader />
            <main class="mx-auto flex w-full max-w-6xl flex-col items-start gap-4 px-4 py-16">
                <h1 class="text-3xl font-semibold">"Learn from working practitioners"</h1>
                <p class="max-w-xl text-sm text-muted-foreground">
                    "Self-paced courses, live classes and articles across design, development and business."
                </p>
                <div class="flex gap-2">
                    <Button href="/courses">"Browse courses"</Button>
                    <Button href="/blogs" variant=ButtonVariant::Outline>"Read the blog"</Button>
                </div>
            </main>
        </div>
    }
}

#[component]
fn CourseCard(course: Course) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let currency = app_state.0.currency();
    let price = format_currency(course.effective_price(), &currency);
    let list_price = course
        .discount_price
        .filter(|d| *d < course.price)
        .map(|_| format_currency(course.price, &currency));
    let category = course
        .category
        .as_ref()
        .map(|c| c.label().to_string())
        .unwrap_or_default();
    let instructor = course
        .instructor
        .as_ref()
        .map(|i| i.label().to_string())
        .unwrap_or_default();
    let level = course.level.clone();

    view! {
        <Card class="gap-3 py-4">
            <CardHeader class="px-4">
                <CardTitle class="text-sm">{course.title.clone()}</CardTitle>
                <CardDescription class="text-xs">{instructor}</CardDescription>
            </CardHeader>
            <CardContent class="flex flex-col gap-2 px-4 text-xs text-muted-foreground">
                <p>{truncate(&course.description, 120)}</p>
                <div class="flex flex-wrap gap-1">
                    {(!category.is_empty()).then(|| view! { <Badge tone=BadgeTone::Neutral>{category}</Badge> })}
                    {(!level.is_empty()).then(|| view! { <Badge tone=BadgeTone::Info>{level}</Badge> })}
                </div>
            </CardContent>
            <CardFooter class="flex items-center justify-between px-4 text-sm">
                <span class="font-medium">
                    {price}
                    {list_price.map(|p| view! { <s class="ml-2 text-xs text-muted-foreground">{p}</s> })}
                </span>
                <span class="text-xs text-muted-foreground">
                    {format!("★ {:.1} · {} enrolled", course.rating, course.total_enrollments)}
                </span>
            </CardFooter>
        </Card>
    }
}

#[component]
pub fn CourseCatalogPage() -> impl IntoView {
    let controller: ListController<Course> = public_controller(CATALOG_PAGE_SIZE);
    let snapshot = bind_snapshot(&controller);
    let page_size = controller.page_size();
    let view_state = Memo::new(move |_| snapshot.with(|s| s.view(page_size)));

    let c = controller.clone();
    let on_page = Callback::new(move |p: usize| c.set_page(p));
    let error = Signal::derive(move || {
        snapshot.with(|s| s.load_error.as_ref().map(|e| e.user_message()))
    });

    view! {
        <div class="min-h-screen bg-background">
            <PublicHeader />
            <main class="mx-auto flex w-full max-w-6xl flex-col gap-4 px-4 py-8">
                <h1 class="text-xl font-semibold">"Courses"</h1>
                <ErrorBanner message=error />
                <FilterBar
                    filter=Signal::derive(move || snapshot.with(|s| s.filter.clone()))
                    facets=Signal::derive(move || {
                        snapshot.with(|s| vec![course_category_filter(&s.records)])
                    })
                    sort_keys=vec![
                        SortKey::Default,
                        SortKey::PriceAsc,
                        SortKey::PriceDesc,
                        SortKey::RatingDesc,
                        SortKey::PopularityDesc,
                    ]
                    placeholder="Search courses..."
                    actions=filter_actions(&controller)
                />
                <Show
                    when=move || snapshot.with(|s| s.loaded || !s.loading)
                    fallback=|| view! { <LoadingState /> }
                >
                    <Show
                        when=move || !view_state.with(|v| v.is_empty())
                        fallback=|| view! {
                            <p class="py-10 text-center text-sm text-muted-foreground">
                                "No courses match your filters."
                            </p>
                        }
                    >
                        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
                            <For
                                each=move || view_state.get().items
                                key=|c| c.id.clone()
                                children=|course| view! { <CourseCard course=course /> }
                            />
                        </div>
                    </Show>
                </Show>
                <Pagination
                    page=Signal::derive(move || view_state.with(|v| v.page))
                    total_pages=Signal::derive(move || view_state.with(|v| v.total_pages))
                    filtered=Signal::derive(move || view_state.with(|v| v.filtered_count))
                    total=Signal::derive(move || view_state.with(|v| v.total_count))
                    on_page=on_page
                />
            </main>
        </div>
    }
}

#[component]
fn BlogCard(post: BlogPost) -> impl IntoView {
    let author = post
        .author
        .as_ref()
        .map(|a| a.label().to_string())
        .unwrap_or_default();
    let meta = [author, format_date(&post.created_at)]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    let category = post.category.clone();

    view! {
        <Card class="gap-3 py-4">
            <CardHeader class="px-4">
                <CardTitle class="text-sm">{post.title.clone()}</CardTitle>
                <CardDescription class="text-xs">{meta}</CardDescription>
            </CardHeader>
            <CardContent class="flex flex-col gap-2 px-4 text-xs text-muted-foreground">
                <p>{truncate(&post.excerpt, 160)}</p>
                {(!category.is_empty()).then(|| view! {
                    <div><Badge tone=BadgeTone::Neutral>{category}</Badge></div>
                })}
            </CardContent>
        </Card>
    }
}

#[component]
pub fn BlogListPage() -> impl IntoView {
    let controller: ListController<BlogPost> = public_controller(GRID_PAGE_SIZE);
    let snapshot = bind_snapshot(&controller);
    let page_size = controller.page_size();
    let view_state = Memo::new(move |_| snapshot.with(|s| s.view(page_size)));

    let c = controller.clone();
    let on_page = Callback::new(move |p: usize| c.set_page(p));
    let error = Signal::derive(move || {
        snapshot.with(|s| s.load_error.as_ref().map(|e| e.user_message()))
    });

    view! {
        <div class="min-h-screen bg-background">
            <PublicHeader />
            <main class="mx-auto flex w-full max-w-6xl flex-col gap-4 px-4 py-8">
                <h1 class="text-xl font-semibold">"Blog"</h1>
                <ErrorBanner message=error />
                <FilterBar
                    filter=Signal::derive(move || snapshot.with(|s| s.filter.clone()))
                    facets=Signal::derive(move || {
                        snapshot.with(|s| vec![blog_category_filter(&s.records)])
                    })
                    placeholder="Search articles..."
                    actions=filter_actions(&controller)
                />
                <Show
                    when=move || snapshot.with(|s| s.loaded || !s.loading)
                    fallback=|| view! { <LoadingState /> }
                >
                    <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                        <For
                            each=move || view_state.get().items
                            key=|p| p.id.clone()
                            children=|post| view! { <BlogCard post=post /> }
                        />
                    </div>
                </Show>
                <Pagination
                    page=Signal::derive(move || view_state.with(|v| v.page))
                    total_pages=Signal::derive(move || view_state.with(|v| v.total_pages))
                    filtered=Signal::derive(move || view_state.with(|v| v.filtered_count))
                    total=Signal::derive(move || view_state.with(|v| v.total_count))
                    on_page=on_page
                />
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_category_filter_uses_ref_ids() {
        let courses: Vec<Course> = serde_json::from_value(json!([
            {"_id": "1", "title": "Go", "category": {"_id": "c2", "name": "Backend"}},
            {"_id": "2", "title": "Figma", "category": {"_id": "c1", "name": "Design"}},
            {"_id": "3", "title": "Rust", "category": {"_id": "c2", "name": "Backend"}},
            {"_id": "4", "title": "Untagged"}
        ]))
        .expect("fixture");
        let filter = course_category_filter(&courses);
        assert_eq!(
            filter.options,
            vec![
                ("c2".to_string(), "Backend".to_string()),
                ("c1".to_string(), "Design".to_string()),
            ]
        );
    }

    #[test]
    fn test_blog_category_filter_skips_blank_categories() {
        let posts: Vec<BlogPost> = serde_json::from_value(json!([
            {"_id": "1", "title": "A", "category": "news"},
            {"_id": "2", "title": "B", "category": ""},
            {"_id": "3", "title": "C", "category": "news"}
        ]))
        .expect("fixture");
        let filter = blog_category_filter(&posts);
        assert_eq!(filter.options, vec![("news".to_string(), "news".to_string())]);
    }
}
