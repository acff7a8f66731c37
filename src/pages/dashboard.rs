use crate::components::ui::ErrorBanner;
use crate::components::{Breakdown, StatCard};
use crate::controller::{ControllerConfig, ListController};
use crate::models::{Course, Order};
use crate::pages::{bind_snapshot, load_list};
use crate::state::AppContext;
use crate::util::format_currency;
use crate::view_model::{count_by, course_stats, order_stats, revenue_by_month, Facet, OrderStats};
use leptos::prelude::*;

pub(crate) fn status_rows(stats: &OrderStats) -> Vec<(String, String)> {
    [
        ("Pending", stats.pending),
        ("Processing", stats.processing),
        ("Completed", stats.completed),
        ("Cancelled", stats.cancelled),
        ("Refunded", stats.refunded),
        ("Failed", stats.failed),
    ]
    .into_iter()
    .map(|(label, n)| (label.to_string(), n.to_string()))
    .collect()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let currency = app_state.0.currency();

    let orders: ListController<Order> = ListController::new(
        app_state.0.api_client.clone(),
        ControllerConfig::admin::<Order>(),
    );
    let courses: ListController<Course> = ListController::new(
        app_state.0.api_client.clone(),
        ControllerConfig::admin::<Course>(),
    );

    let order_snapshot = bind_snapshot(&orders);
    let course_snapshot = bind_snapshot(&courses);
    load_list(&orders, &app_state.0);
    load_list(&courses, &app_state.0);

    let stats = Memo::new(move |_| order_snapshot.with(|s| order_stats(&s.records)));
    let catalog = Memo::new(move |_| course_snapshot.with(|s| course_stats(&s.records)));

    let error = Signal::derive(move || {
        order_snapshot
            .with(|s| s.load_error.as_ref().map(|e| e.user_message()))
            .or_else(|| course_snapshot.with(|s| s.load_error.as_ref().map(|e| e.user_message())))
    });

    let revenue = {
        let currency = currency.clone();
        Signal::derive(move || format_currency(stats.with(|s| s.total_revenue), &currency))
    };
    let average = {
        let currency = currency.clone();
        Signal::derive(move || format_currency(stats.with(|s| s.average_order_value()), &currency))
    };
    let monthly = Signal::derive(move || {
        order_snapshot.with(|s| {
            revenue_by_month(&s.records)
                .into_iter()
                .map(|(month, amount)| (month, format_currency(amount, &currency)))
                .collect::<Vec<_>>()
        })
    });

    let course_statuses = Signal::derive(move || {
        course_snapshot.with(|s| {
            count_by(&s.records, Facet::Status)
                .into_iter()
                .map(|(status, n)| (status, n.to_string()))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="flex flex-col gap-4">
            <h1 class="text-lg font-semibold">"Dashboard"</h1>

            <ErrorBanner message=error />

            <div class="grid gap-3 sm:grid-cols-2 lg:grid-cols-4">
                <StatCard label="Revenue" value=revenue hint="Completed orders" />
                <StatCard
                    label="Orders"
                    value=Signal::derive(move || stats.with(|s| s.total_orders.to_string()))
                />
                <StatCard label="Average order" value=average />
                <StatCard
                    label="Courses"
                    value=Signal::derive(move || catalog.with(|c| c.total.to_string()))
                    hint="All statuses"
                />
                <StatCard
                    label="Approved courses"
                    value=Signal::derive(move || catalog.with(|c| c.approved.to_string()))
                />
                <StatCard
                    label="Pending review"
                    value=Signal::derive(move || catalog.with(|c| c.pending.to_string()))
                />
                <StatCard
                    label="Enrollments"
                    value=Signal::derive(move || catalog.with(|c| c.total_enrollments.to_string()))
                />
                <StatCard
                    label="Average rating"
                    value=Signal::derive(move || catalog.with(|c| format!("{:.1}", c.average_rating)))
                    hint="Rated courses only"
                />
            </div>

            <div class="grid gap-3 lg:grid-cols-3">
                <Breakdown
                    title="Orders by status"
                    rows=Signal::derive(move || stats.with(status_rows))
                />
                <Breakdown title="Courses by status" rows=course_statuses />
                <Breakdown title="Revenue by month" rows=monthly />
            </div>
        </div>
    }
}
