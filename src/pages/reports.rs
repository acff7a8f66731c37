use crate::components::ui::{Button, ButtonSize, ErrorBanner, LoadingState};
use crate::components::{Breakdown, StatCard};
use crate::report::{download_text, ReportDocument, ReportSummary};
use crate::state::AppContext;
use crate::util::{format_currency, today_iso_local};
use icons::Download;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub(crate) const REPORT_TITLE: &str = "LearnHub summary report";

pub(crate) fn report_filename(date: &str) -> String {
    format!("learnhub-report-{date}.txt")
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let currency = app_state.0.currency();

    let summary: RwSignal<Option<ReportSummary>> = RwSignal::new(None);
    let loading = RwSignal::new(true);
    let load_error: RwSignal<Option<String>> = RwSignal::new(None);
    let download_error: RwSignal<Option<String>> = RwSignal::new(None);

    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = alive.clone();
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }

    let state = app_state.0.clone();
    spawn_local(async move {
        let result = state.api_client.report_summary().await;
        if !alive.load(Ordering::Relaxed) {
            return;
        }
        match result {
            Ok(s) => {
                log!("report summary loaded");
                summary.set(Some(s));
            }
            Err(e) => {
                error!("report summary failed: {e}");
                if e.is_unauthorized() {
                    state.sign_out();
                    let _ = window().location().set_href("/login");
                    return;
                }
                load_error.set(Some(e.user_message()));
            }
        }
        loading.set(false);
    });

    let on_download = {
        let currency = currency.clone();
        move |_| {
            let Some(s) = summary.get_untracked() else {
                return;
            };
            let today = today_iso_local();
            let doc = ReportDocument::build(&s, REPORT_TITLE, &today, &currency);
            log!("report: {} page(s)", doc.page_count());
            match download_text(&report_filename(&today), &doc.render_text()) {
                Ok(()) => download_error.set(None),
                Err(e) => {
                    error!("report download failed: {e}");
                    download_error.set(Some(format!("Download failed: {e}")));
                }
            }
        }
    };

    let stat = move |f: fn(&ReportSummary) -> String| {
        Signal::derive(move || summary.with(|s| s.as_ref().map(f).unwrap_or_default()))
    };
    let revenue = {
        let currency = currency.clone();
        Signal::derive(move || {
            summary.with(|s| {
                s.as_ref()
                    .map(|s| format_currency(s.stats.total_revenue, &currency))
                    .unwrap_or_default()
            })
        })
    };
    let top_courses = {
        let currency = currency.clone();
        Signal::derive(move || {
            summary.with(|s| {
                s.as_ref()
                    .map(|s| {
                        s.top_courses
                            .iter()
                            .map(|c| {
                                (
                                    c.title.clone(),
                                    format!(
                                        "{} enrolled, {}",
                                        c.enrollments,
                                        format_currency(c.revenue, &currency)
                                    ),
                                )
                            })
                            .collect()
                    })
                    .unwrap_or_default()
            })
        })
    };

    view! {
        <div class="flex flex-col gap-4">
            <div class="flex items-center justify-between gap-3">
                <h1 class="text-lg font-semibold">"Reports"</h1>
                <Button
                    size=ButtonSize::Sm
                    attr:disabled=move || summary.with(|s| s.is_none())
                    on:click=on_download
                >
                    <Download class="size-4" />
                    "Download report"
                </Button>
            </div>

            <ErrorBanner message=load_error />
            <ErrorBanner
                message=download_error
                on_dismiss=Callback::new(move |_| download_error.set(None))
            />

            <Show when=move || !loading.get() fallback=|| view! { <LoadingState /> }>
                <div class="grid gap-3 sm:grid-cols-2 lg:grid-cols-5">
                    <StatCard label="Users" value=stat(|s| s.stats.total_users.to_string()) />
                    <StatCard label="Courses" value=stat(|s| s.stats.total_courses.to_string()) />
                    <StatCard label="Orders" value=stat(|s| s.stats.total_orders.to_string()) />
                    <StatCard
                        label="Enrollments"
                        value=stat(|s| s.stats.total_enrollments.to_string())
                    />
                    <StatCard label="Revenue" value=revenue />
                </div>
                <Breakdown title="Top courses" rows=top_courses />
            </Show>
        </div>
    }
}
