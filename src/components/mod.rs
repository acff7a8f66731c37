mod data_table;
mod filter_bar;
mod pagination;
mod resource_form;
mod stat_card;
pub mod ui;

pub(crate) use data_table::{Cell, DataTable, PendingDelete, RowActions, RowData};
pub(crate) use filter_bar::{FacetFilter, FilterActions, FilterBar};
pub(crate) use pagination::Pagination;
pub(crate) use resource_form::{
    changed_payload, form_payload, prefill, FieldKind, FormField, FormMode, FormValues,
    ResourceForm,
};
pub(crate) use stat_card::{Breakdown, StatCard};
