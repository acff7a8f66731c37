use crate::components::ui::{Card, CardContent, CardDescription, CardHeader};
use leptos::prelude::*;

#[component]
pub(crate) fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into, optional)] hint: String,
) -> impl IntoView {
    view! {
        <Card class="gap-1 py-4">
            <CardHeader class="px-4">
                <CardDescription class="text-xs">{label}</CardDescription>
            </CardHeader>
            <CardContent class="px-4">
                <div class="text-2xl font-semibold tabular-nums">{move || value.get()}</div>
                {(!hint.is_empty()).then(|| view! { <div class="text-xs text-muted-foreground">{hint}</div> })}
            </CardContent>
        </Card>
    }
}

/// Label / count rows, e.g. orders per status.
#[component]
pub(crate) fn Breakdown(
    #[prop(into)] title: String,
    #[prop(into)] rows: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <Card class="gap-2 py-4">
            <CardHeader class="px-4">
                <CardDescription class="text-xs font-medium">{title}</CardDescription>
            </CardHeader>
            <CardContent class="px-4">
                <ul class="flex flex-col gap-1 text-sm">
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|(label, value)| view! {
                                <li class="flex items-center justify-between">
                                    <span class="capitalize text-muted-foreground">{label}</span>
                                    <span class="tabular-nums">{value}</span>
                                </li>
                            })
                            .collect_view()
                    }}
                </ul>
            </CardContent>
        </Card>
    }
}
