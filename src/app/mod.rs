use crate::catalog::AdminResource;
use crate::models::{
    Category, Course, CourseModule, DesignTemplate, Lesson, LiveClass, Website,
};
use crate::pages::{
    resource_list_page, BlogListPage, CourseCatalogPage, DashboardPage, HomePage, LoginPage,
    OrdersPage, ReportsPage, RootAuthed,
};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

fn admin_list<R: AdminResource>() -> impl IntoView {
    view! {
        <RootAuthed>
            {resource_list_page::<R>()}
        </RootAuthed>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("admin") view=move || view! {
                    <RootAuthed>
                        <DashboardPage />
                    </RootAuthed>
                } />
                <Route path=path!("admin/courses") view={move || admin_list::<Course>()} />
                <Route path=path!("admin/categories") view={move || admin_list::<Category>()} />
                <Route path=path!("admin/modules") view={move || admin_list::<CourseModule>()} />
                <Route path=path!("admin/lessons") view={move || admin_list::<Lesson>()} />
                <Route path=path!("admin/design-templates") view={move || admin_list::<DesignTemplate>()} />
                <Route path=path!("admin/websites") view={move || admin_list::<Website>()} />
                <Route path=path!("admin/live-classes") view={move || admin_list::<LiveClass>()} />
                <Route path=path!("admin/orders") view=move || view! {
                    <RootAuthed>
                        <OrdersPage />
                    </RootAuthed>
                } />
                <Route path=path!("admin/reports") view=move || view! {
                    <RootAuthed>
                        <ReportsPage />
                    </RootAuthed>
                } />
                <Route path=path!("courses") view=CourseCatalogPage />
                <Route path=path!("blogs") view=BlogListPage />
                <Route path=path!("") view=HomePage />
            </Routes>
        </Router>
    }
}
