use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use icons::{
    BookOpen, Calendar, FileText, Folder, Layers, LayoutDashboard, LayoutGrid, List, LogOut,
    Monitor, ShoppingCart,
};
use leptos::prelude::*;
use leptos_router::hooks::use_location;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NavIcon {
    Dashboard,
    Courses,
    Categories,
    Modules,
    Lessons,
    Templates,
    Websites,
    LiveClasses,
    Orders,
    Reports,
}

const NAV: &[(&str, &str, NavIcon)] = &[
    ("/admin", "Dashboard", NavIcon::Dashboard),
    ("/admin/courses", "Courses", NavIcon::Courses),
    ("/admin/categories", "Categories", NavIcon::Categories),
    ("/admin/modules", "Modules", NavIcon::Modules),
    ("/admin/lessons", "Lessons", NavIcon::Lessons),
    ("/admin/design-templates", "Design templates", NavIcon::Templates),
    ("/admin/websites", "Websites", NavIcon::Websites),
    ("/admin/live-classes", "Live classes", NavIcon::LiveClasses),
    ("/admin/orders", "Orders", NavIcon::Orders),
    ("/admin/reports", "Reports", NavIcon::Reports),
];

fn nav_icon(icon: NavIcon) -> AnyView {
    match icon {
        NavIcon::Dashboard => view! { <LayoutDashboard /> }.into_any(),
        NavIcon::Courses => view! { <BookOpen /> }.into_any(),
        NavIcon::Categories => view! { <Folder /> }.into_any(),
        NavIcon::Modules => view! { <Layers /> }.into_any(),
        NavIcon::Lessons => view! { <List /> }.into_any(),
        NavIcon::Templates => view! { <LayoutGrid /> }.into_any(),
        NavIcon::Websites => view! { <Monitor /> }.into_any(),
        NavIcon::LiveClasses => view! { <Calendar /> }.into_any(),
        NavIcon::Orders => view! { <ShoppingCart /> }.into_any(),
        NavIcon::Reports => view! { <FileText /> }.into_any(),
    }
}

/// `/admin` only matches itself; sections match their sub-paths too.
fn is_active(pathname: &str, href: &str) -> bool {
    let pathname = pathname.trim_end_matches('/');
    if href == "/admin" {
        return pathname == "/admin";
    }
    pathname == href || pathname.starts_with(&format!("{href}/"))
}

#[component]
pub fn AdminLayout(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let current_user = app_state.0.current_user;
    let location = use_location();
    let pathname = move || location.pathname.get();

    let user_label = move || {
        current_user
            .get()
            .and_then(|u| u.name().or(u.email()).map(str::to_string))
            .unwrap_or_else(|| "Admin".to_string())
    };

    let on_sign_out = {
        let state = app_state.0.clone();
        move |_| {
            state.sign_out();
            let _ = window().location().set_href("/login");
        }
    };

    let nav = move || {
        let p = pathname();
        NAV.iter()
            .map(|(href, label, icon)| {
                let active = is_active(&p, href);
                let variant = if active {
                    ButtonVariant::Secondary
                } else {
                    ButtonVariant::Ghost
                };
                view! {
                    <Button
                        variant=variant
                        size=ButtonSize::Sm
                        class="w-full justify-start"
                        attr:aria-current=move || if active { Some("page") } else { None }
                        href=href.to_string()
                    >
                        {nav_icon(*icon)}
                        <span class="truncate">{*label}</span>
                    </Button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="flex min-h-screen bg-background text-foreground">
            <aside class="flex w-60 shrink-0 flex-col border-r bg-muted/20 px-3 py-4">
                <a href="/" class="mb-4 px-2 text-sm font-semibold">"LearnHub Admin"</a>
                <nav class="flex flex-1 flex-col gap-1">{nav}</nav>
                <div class="mt-4 border-t pt-3">
                    <div class="mb-2 truncate px-2 text-xs text-muted-foreground">{user_label}</div>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        class="w-full justify-start"
                        on:click=on_sign_out
                    >
                        <LogOut />
                        "Sign out"
                    </Button>
                </div>
            </aside>
            <main class="min-w-0 flex-1 px-6 py-6">
                {children()}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_nav_matching() {
        assert!(is_active("/admin", "/admin"));
        assert!(is_active("/admin/", "/admin"));
        assert!(!is_active("/admin/courses", "/admin"));
        assert!(is_active("/admin/courses", "/admin/courses"));
        assert!(is_active("/admin/courses/new", "/admin/courses"));
        assert!(!is_active("/admin/courses-archive", "/admin/courses"));
    }
}
