use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input flex w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2 aria-invalid:border-destructive read-only:bg-muted";

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,

    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] disabled: bool,
    #[prop(optional)] required: bool,
    #[prop(optional)] autofocus: bool,
    /// Passed through for `type="number"`.
    #[prop(into, optional)] step: String,

    // Manual two-way binding; `bind:value` differs between Leptos releases.
    #[prop(into)] bind_value: RwSignal<String>,

    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "h-9", class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                bind_value.set(input.value());
            }
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            step=step
            disabled=disabled
            required=required
            autofocus=autofocus
            prop:value=move || bind_value.get()
            on:input=on_input
            node_ref=node_ref
        />
    }
}

/// Checkbox bound to a `"true"`/`"false"` string signal so it can share the
/// form value map with text fields.
#[component]
pub fn Checkbox(
    #[prop(into, optional)] id: String,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        if let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            bind_value.set(input.checked().to_string());
        }
    };

    view! {
        <input
            type="checkbox"
            id=id
            class="size-4 rounded border-input accent-primary"
            prop:checked=move || bind_value.get() == "true"
            on:change=on_change
        />
    }
}

#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(default = 4)] rows: u32,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "py-2", class);

    view! {
        <textarea
            data-name="Textarea"
            id=id
            class=merged_class
            placeholder=placeholder
            rows=rows
            prop:value=move || bind_value.get()
            on:input=move |ev| bind_value.set(event_target_value(&ev))
        ></textarea>
    }
}
