use crate::components::StatCard;
use crate::controller::{ControllerConfig, ListController};
use crate::models::Order;
use crate::pages::ResourceList;
use crate::state::AppContext;
use crate::util::format_currency;
use crate::view_model::order_stats;
use leptos::prelude::*;

/// Orders table with summary cards computed from the same collection.
#[component]
pub fn OrdersPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let currency = app_state.0.currency();
    let controller: ListController<Order> = ListController::new(
        app_state.0.api_client.clone(),
        ControllerConfig::admin::<Order>(),
    );

    let stats = RwSignal::new(order_stats(&controller.snapshot().records));
    let id = controller.subscribe(move |s| {
        let _ = stats.try_set(order_stats(&s.records));
    });
    let c = controller.clone();
    on_cleanup(move || c.unsubscribe(id));

    let revenue = Signal::derive(move || format_currency(stats.with(|s| s.total_revenue), &currency));

    view! {
        <div class="flex flex-col gap-4">
            <div class="grid gap-3 sm:grid-cols-2 lg:grid-cols-4">
                <StatCard label="Revenue" value=revenue hint="Completed orders" />
                <StatCard
                    label="Completed"
                    value=Signal::derive(move || stats.with(|s| s.completed.to_string()))
                />
                <StatCard
                    label="Pending"
                    value=Signal::derive(move || stats.with(|s| s.pending.to_string()))
                />
                <StatCard
                    label="Cancelled / refunded"
                    value=Signal::derive(move || stats.with(|s| (s.cancelled + s.refunded).to_string()))
                />
            </div>
            <ResourceList controller=controller />
        </div>
    }
}
