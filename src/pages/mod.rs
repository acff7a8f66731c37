mod auth;
mod dashboard;
mod layout;
mod orders;
mod public;
mod reports;
mod resource_list;

pub use auth::{LoginPage, RootAuthed};
pub use dashboard::DashboardPage;
pub use layout::AdminLayout;
pub use orders::OrdersPage;
pub use public::{BlogListPage, CourseCatalogPage, HomePage};
pub use reports::ReportsPage;
pub(crate) use resource_list::{bind_snapshot, filter_actions, load_list, resource_list_page, ResourceList};
