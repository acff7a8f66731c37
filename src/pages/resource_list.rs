use crate::catalog::AdminResource;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CardTitle, ErrorBanner,
    LoadingState,
};
use crate::components::{
    changed_payload, form_payload, prefill, Cell, DataTable, FilterActions, FilterBar, FormMode,
    FormValues, Pagination, PendingDelete, ResourceForm, RowActions, RowData,
};
use crate::controller::{ListController, ListSnapshot};
use crate::models::Resource;
use crate::state::{AppContext, AppState};
use crate::view_model::{
    build_tree, filter_records, flatten_tree, sort_records, ListView, ViewMode,
};
use leptos::logging::warn;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use serde_json::Value;

/// Mirror a controller into a signal for as long as the calling component
/// lives. Unmounting detaches the controller so late responses are dropped.
pub(crate) fn bind_snapshot<R: Resource>(
    controller: &ListController<R>,
) -> RwSignal<ListSnapshot<R>> {
    let snapshot = RwSignal::new(controller.snapshot());
    let id = controller.subscribe(move |s| {
        let _ = snapshot.try_set(s.clone());
    });

    let c = controller.clone();
    on_cleanup(move || {
        c.unsubscribe(id);
        c.detach();
    });
    snapshot
}

/// Refresh, and sign out when the backend rejects the stored token.
pub(crate) fn load_list<R: Resource>(controller: &ListController<R>, state: &AppState) {
    let state = state.clone();
    let c = controller.clone();
    spawn_local(async move {
        c.refresh().await;
        let unauthorized = c
            .snapshot()
            .load_error
            .as_ref()
            .map(|e| e.is_unauthorized())
            .unwrap_or(false);
        if unauthorized && !c.is_detached() {
            warn!("[{}] session rejected, signing out", R::COLLECTION);
            state.sign_out();
            let _ = window().location().set_href("/login");
        }
    });
}

/// Filter bar callbacks that drive a controller.
pub(crate) fn filter_actions<R: Resource>(controller: &ListController<R>) -> FilterActions {
    let c = controller.clone();
    FilterActions {
        on_query: Callback::new({
            let c = c.clone();
            move |q: String| {
                // The bar echoes its initial text on mount.
                if c.snapshot().filter.query != q {
                    c.set_query(q);
                }
            }
        }),
        on_facet: Callback::new({
            let c = c.clone();
            move |(facet, value)| c.set_facet(facet, value)
        }),
        on_sort: Callback::new({
            let c = c.clone();
            move |key| c.set_sort(key)
        }),
        on_view: Callback::new({
            let c = c.clone();
            move |mode| c.set_view_mode(mode)
        }),
        on_reset: Callback::new(move |_| c.reset_filters()),
    }
}

fn rows_for<R: AdminResource>(records: &[R], currency: &str) -> Vec<RowData> {
    records
        .iter()
        .map(|r| RowData {
            id: r.id().to_string(),
            label: r.display_name().to_string(),
            depth: 0,
            cells: r.cells(currency),
        })
        .collect()
}

/// Tree rows over every filtered record. Pagination does not apply.
fn tree_rows<R: AdminResource>(snapshot: &ListSnapshot<R>, currency: &str) -> Vec<RowData> {
    let mut filtered = filter_records(&snapshot.records, &snapshot.filter);
    sort_records(&mut filtered, snapshot.filter.sort);
    let owned: Vec<R> = filtered.into_iter().cloned().collect();
    flatten_tree(&build_tree(&owned))
        .into_iter()
        .map(|(depth, r)| RowData {
            id: r.id().to_string(),
            label: r.display_name().to_string(),
            depth,
            cells: r.cells(currency),
        })
        .collect()
}

/// Admin page for one resource type over `GET /{collection}/admin/all`.
pub(crate) fn resource_list_page<R: AdminResource>() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let controller: ListController<R> =
        ListController::new(app_state.0.api_client.clone(), R::controller_config());
    view! { <ResourceList controller=controller /> }
}

#[component]
pub(crate) fn ResourceList<R: AdminResource>(controller: ListController<R>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let currency = app_state.0.currency();
    let page_size = controller.page_size();

    let snapshot = bind_snapshot(&controller);
    load_list(&controller, &app_state.0);

    let view_state: Memo<ListView<R>> = Memo::new(move |_| snapshot.with(|s| s.view(page_size)));
    let filter = Signal::derive(move || snapshot.with(|s| s.filter.clone()));
    let facets = Signal::derive(move || snapshot.with(|s| R::facet_filters(&s.records)));

    let form_mode: RwSignal<Option<FormMode>> = RwSignal::new(None);
    let form_error: RwSignal<Option<String>> = RwSignal::new(None);

    let c = controller.clone();
    let actions = filter_actions(&c);

    let on_page = Callback::new({
        let c = c.clone();
        move |p: usize| c.set_page(p)
    });

    let open_create = move |_| {
        form_error.set(None);
        form_mode.set(Some(FormMode::Create));
    };

    let on_edit = Callback::new(move |id: String| {
        let record = snapshot.with_untracked(|s| {
            s.records
                .iter()
                .find(|r| r.id() == id)
                .and_then(|r| serde_json::to_value(r).ok())
        });
        let Some(record) = record else {
            return;
        };
        let original = prefill(&R::form_fields(), Some(&record));
        form_error.set(None);
        form_mode.set(Some(FormMode::Edit { id, original }));
    });

    let on_delete = Callback::new({
        let c = c.clone();
        move |id: String| {
            let c = c.clone();
            spawn_local(async move {
                let _ = c.remove(&id).await;
            });
        }
    });

    let on_submit = Callback::new({
        let c = c.clone();
        move |values: FormValues| {
            let fields = R::form_fields();
            let Some(mode) = form_mode.get_untracked() else {
                return;
            };
            let payload = match &mode {
                FormMode::Create => form_payload(&fields, &values),
                FormMode::Edit { original, .. } => changed_payload(&fields, original, &values),
            };
            let payload = match payload {
                Ok(p) => p,
                Err(message) => {
                    form_error.set(Some(message));
                    return;
                }
            };
            // Nothing edited.
            if matches!(mode, FormMode::Edit { .. })
                && matches!(&payload, Value::Object(m) if m.is_empty())
            {
                form_mode.set(None);
                return;
            }

            form_error.set(None);
            let c = c.clone();
            spawn_local(async move {
                let result = match mode {
                    FormMode::Create => c.create(payload).await,
                    FormMode::Edit { id, .. } => c.update(&id, payload).await,
                };
                match result {
                    Ok(_) => {
                        let _ = form_mode.try_set(None);
                    }
                    Err(e) => {
                        let _ = form_error.try_set(Some(e.user_message()));
                    }
                }
            });
        }
    });

    let on_cancel = Callback::new({
        let c = c.clone();
        move |_| {
            form_mode.set(None);
            form_error.set(None);
            c.clear_mutation_error();
        }
    });

    // Esc closes the open form.
    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && form_mode.try_get_untracked().flatten().is_some() {
            on_cancel.run(());
        }
    });
    on_cleanup(move || key_handle.remove());

    let dismiss_mutation = Callback::new({
        let c = c.clone();
        move |_| c.clear_mutation_error()
    });

    let retry = {
        let c = c.clone();
        let state = app_state.0.clone();
        move |_| load_list(&c, &state)
    };

    let load_error = Signal::derive(move || {
        snapshot.with(|s| s.load_error.as_ref().map(|e| e.user_message()))
    });
    let mutation_error = Signal::derive(move || {
        if form_mode.get().is_some() {
            None
        } else {
            snapshot.with(|s| s.mutation_error.clone())
        }
    });
    let mutating = Signal::derive(move || snapshot.with(|s| s.mutating));
    let view_mode = move || snapshot.with(|s| s.filter.view_mode);

    let form = move || {
        form_mode.get().map(|mode| {
            let (title, initial) = match &mode {
                FormMode::Create => (
                    format!("New {}", R::LABEL.to_lowercase()),
                    prefill(&R::form_fields(), None),
                ),
                FormMode::Edit { original, .. } => {
                    (format!("Edit {}", R::LABEL.to_lowercase()), original.clone())
                }
            };
            view! {
                <ResourceForm
                    title=title
                    fields=R::form_fields()
                    initial=initial
                    error=form_error
                    saving=mutating
                    on_submit=on_submit
                    on_cancel=on_cancel
                />
            }
        })
    };

    let rows_currency = currency.clone();
    let list_rows =
        Signal::derive(move || view_state.with(|v| rows_for(&v.items, &rows_currency)));
    let tree_currency = currency.clone();
    let tree_rows_signal = Signal::derive(move || snapshot.with(|s| tree_rows(s, &tree_currency)));

    let grid_pending = RwSignal::new(PendingDelete::default());
    let grid = {
        let currency = currency.clone();
        move || {
            let columns = R::columns();
            view_state
                .get()
                .items
                .into_iter()
                .map(|r| {
                    let fields = columns
                        .iter()
                        .zip(r.cells(&currency))
                        .map(|(label, cell)| {
                            let value = match cell {
                                Cell::Text(t) | Cell::Status(t) => t,
                                Cell::Link { label, .. } => label,
                            };
                            view! {
                                <div class="flex justify-between gap-2 text-xs">
                                    <span class="text-muted-foreground">{*label}</span>
                                    <span class="truncate">{value}</span>
                                </div>
                            }
                        })
                        .collect_view();
                    let title = r.display_name().to_string();
                    let row_id = r.id().to_string();
                    let row_label = r.display_name().to_string();
                    view! {
                        <Card class="gap-2 py-4">
                            <CardHeader class="px-4">
                                <CardTitle class="text-sm">{title}</CardTitle>
                            </CardHeader>
                            <CardContent class="flex flex-col gap-1 px-4">
                                {fields}
                                <div class="flex justify-end pt-2">
                                    <RowActions
                                        id=row_id
                                        label=row_label
                                        on_edit=(!R::form_fields().is_empty()).then_some(on_edit)
                                        on_delete=on_delete
                                        busy=mutating
                                        pending=grid_pending
                                    />
                                </div>
                            </CardContent>
                        </Card>
                    }
                })
                .collect_view()
        }
    };

    let body = move || {
        if snapshot.with(|s| s.loading && !s.loaded) {
            return view! { <LoadingState /> }.into_any();
        }
        match view_mode() {
            ViewMode::Grid => view! {
                <div class="grid gap-3 sm:grid-cols-2 lg:grid-cols-3">{grid.clone()}</div>
            }
            .into_any(),
            ViewMode::Tree => view! {
                <DataTable
                    columns=R::columns()
                    rows=tree_rows_signal
                    on_edit=on_edit
                    on_delete=on_delete
                    busy=mutating
                />
            }
            .into_any(),
            ViewMode::List => view! {
                <DataTable
                    columns=R::columns()
                    rows=list_rows
                    on_edit=on_edit
                    on_delete=on_delete
                    busy=mutating
                />
            }
            .into_any(),
        }
    };

    view! {
        <div class="flex flex-col gap-4">
            <div class="flex items-center justify-between gap-3">
                <div>
                    <h1 class="text-lg font-semibold">{R::TITLE}</h1>
                    <p class="text-xs text-muted-foreground">
                        {move || format!("{} total", snapshot.with(|s| s.records.len()))}
                    </p>
                </div>
                <div class="flex items-center gap-2">
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Outline
                        attr:disabled=move || snapshot.with(|s| s.loading)
                        on:click=retry
                    >
                        "Refresh"
                    </Button>
                    {R::can_create().then(|| view! {
                        <Button size=ButtonSize::Sm on:click=open_create>
                            {format!("New {}", R::LABEL.to_lowercase())}
                        </Button>
                    })}
                </div>
            </div>

            <ErrorBanner message=load_error />
            <ErrorBanner message=mutation_error on_dismiss=dismiss_mutation />

            {form}

            <FilterBar
                filter=filter
                facets=facets
                sort_keys=R::sort_keys()
                view_modes=R::view_modes()
                placeholder=format!("Search {}...", R::TITLE.to_lowercase())
                actions=actions
            />

            {body}

            <Show when=move || view_mode() != ViewMode::Tree>
                <Pagination
                    page=Signal::derive(move || view_state.with(|v| v.page))
                    total_pages=Signal::derive(move || view_state.with(|v| v.total_pages))
                    filtered=Signal::derive(move || view_state.with(|v| v.filtered_count))
                    total=Signal::derive(move || view_state.with(|v| v.total_count))
                    on_page=on_page
                />
            </Show>
        </div>
    }
}
