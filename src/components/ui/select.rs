use leptos::prelude::*;
use tw_merge::tw_merge;

/// Native `<select>` over `(value, label)` pairs.
///
/// The browser's own control is used so keyboard and mobile pickers behave
/// natively; the selected value is pushed through `on_change`.
#[component]
pub fn Select(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] aria_label: String,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "border-input h-9 rounded-md border bg-transparent px-2 text-sm shadow-xs outline-none focus-visible:ring-2 focus-visible:ring-ring/50",
        class
    );

    view! {
        <select
            data-name="Select"
            id=id
            class=merged_class
            aria-label=aria_label
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            {move || {
                let current = value.get();
                options
                    .get()
                    .into_iter()
                    .map(|(v, label)| {
                        let selected = v == current;
                        view! { <option value=v selected=selected>{label}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}

/// `Select` bound directly to a string signal.
#[component]
pub fn BoundSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    bind_value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <Select
            class=class
            id=id
            options=options
            value=bind_value
            on_change=Callback::new(move |v| bind_value.set(v))
        />
    }
}
