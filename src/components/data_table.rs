use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, StatusBadge, Table, TableBody, TableCell, TableHead,
    TableHeader, TableRow, TableWrapper,
};
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Cell {
    Text(String),
    Status(String),
    Link { href: String, label: String },
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RowData {
    pub id: String,
    pub label: String,
    /// Indentation level in tree view.
    pub depth: usize,
    pub cells: Vec<Cell>,
}

fn render_cell(cell: Cell, depth: usize, first: bool) -> AnyView {
    let indent = if first && depth > 0 {
        format!("padding-left: {}rem", depth as f32 * 1.25)
    } else {
        String::new()
    };
    match cell {
        Cell::Text(t) => view! { <span style=indent>{t}</span> }.into_any(),
        Cell::Status(s) => view! { <StatusBadge status=s /> }.into_any(),
        Cell::Link { href, label } => view! {
            <a class="text-primary underline-offset-4 hover:underline" href=href target="_blank" rel="noopener">
                {label}
            </a>
        }
        .into_any(),
    }
}

/// The record, if any, whose delete button is waiting for confirmation.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct PendingDelete(Option<String>);

impl PendingDelete {
    pub fn ask(&mut self, id: &str) {
        self.0 = Some(id.to_string());
    }

    pub fn is_asking(&self, id: &str) -> bool {
        self.0.as_deref() == Some(id)
    }

    /// Clears the prompt and returns the id only when `id` was the one asked.
    pub fn confirm(&mut self, id: &str) -> Option<String> {
        if self.is_asking(id) {
            self.0.take()
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.0 = None;
    }
}

/// Edit and delete buttons for one record. Delete asks inline before
/// `on_delete` fires.
#[component]
pub(crate) fn RowActions(
    id: String,
    label: String,
    #[prop(into)] on_edit: Option<Callback<String>>,
    #[prop(into)] on_delete: Option<Callback<String>>,
    #[prop(into)] busy: Signal<bool>,
    pending: RwSignal<PendingDelete>,
) -> impl IntoView {
    let asking_id = id.clone();
    let edit_id = id.clone();
    let delete_id = id.clone();

    view! {
        <Show
            when=move || pending.with(|p| p.is_asking(&asking_id))
            fallback=move || {
                let edit_id = edit_id.clone();
                let delete_id = delete_id.clone();
                view! {
                    {on_edit.map(|cb| view! {
                        <Button
                            size=ButtonSize::Sm
                            variant=ButtonVariant::Ghost
                            on:click=move |_| cb.run(edit_id.clone())
                        >
                            "Edit"
                        </Button>
                    })}
                    {on_delete.map(|_| view! {
                        <Button
                            size=ButtonSize::Sm
                            variant=ButtonVariant::Ghost
                            class="text-destructive"
                            on:click=move |_| pending.update(|p| p.ask(&delete_id))
                        >
                            "Delete"
                        </Button>
                    })}
                }
            }
        >
            {
                let id = id.clone();
                view! {
                    <span class="mr-2 text-xs text-muted-foreground">{format!("Delete \"{label}\"?")}</span>
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Destructive
                        attr:disabled=move || busy.get()
                        on:click=move |_| {
                            let confirmed = pending.try_update(|p| p.confirm(&id)).flatten();
                            if let (Some(id), Some(cb)) = (confirmed, on_delete) {
                                cb.run(id);
                            }
                        }
                    >
                        "Confirm"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Ghost
                        on:click=move |_| pending.update(PendingDelete::cancel)
                    >
                        "Cancel"
                    </Button>
                }
            }
        </Show>
    }
}

/// Table with optional edit/delete actions.
#[component]
pub(crate) fn DataTable(
    columns: Vec<&'static str>,
    #[prop(into)] rows: Signal<Vec<RowData>>,
    #[prop(optional)] on_edit: Option<Callback<String>>,
    #[prop(optional)] on_delete: Option<Callback<String>>,
    #[prop(into, optional)] busy: Signal<bool>,
) -> impl IntoView {
    let pending = RwSignal::new(PendingDelete::default());
    let has_actions = on_edit.is_some() || on_delete.is_some();
    let column_count = columns.len() + usize::from(has_actions);

    let header = columns
        .into_iter()
        .map(|c| view! { <TableHead>{c}</TableHead> })
        .collect_view();

    let actions = move |id: String, label: String| {
        view! {
            <TableCell class="whitespace-nowrap text-right">
                <RowActions
                    id=id
                    label=label
                    on_edit=on_edit
                    on_delete=on_delete
                    busy=busy
                    pending=pending
                />
            </TableCell>
        }
    };

    view! {
        <TableWrapper>
            <Table>
                <TableHeader>
                    <TableRow>
                        {header}
                        {has_actions.then(|| view! { <TableHead class="text-right">"Actions"</TableHead> })}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <Show
                        when=move || !rows.with(|r| r.is_empty())
                        fallback=move || view! {
                            <TableRow>
                                <TableCell attr:colspan=column_count.to_string() class="py-8 text-center text-xs text-muted-foreground">
                                    "No records match the current filters."
                                </TableCell>
                            </TableRow>
                        }
                    >
                        <For
                            each=move || rows.get()
                            key=|row| (row.id.clone(), row.depth)
                            children=move |row: RowData| {
                                let RowData { id, label, depth, cells } = row;
                                let cells = cells
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, c)| view! { <TableCell>{render_cell(c, depth, i == 0)}</TableCell> })
                                    .collect_view();
                                view! {
                                    <TableRow>
                                        {cells}
                                        {has_actions.then(|| actions(id.clone(), label.clone()))}
                                    </TableRow>
                                }
                            }
                        />
                    </Show>
                </TableBody>
            </Table>
        </TableWrapper>
    }
}
