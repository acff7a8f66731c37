use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::tw_merge;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm"}
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
}

pub use components::*;

/// Destructive banner shown while `message` is `Some`. Dismissible when
/// `on_dismiss` is given.
#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional, into)] class: String,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    let class = tw_merge!("border-destructive/30", class);

    move || {
        message.get().map(|m| {
            view! {
                <Alert class=class.clone() attr:role="alert">
                    <div class="flex items-start justify-between gap-3">
                        <AlertDescription class="text-destructive text-xs">{m}</AlertDescription>
                        {on_dismiss.map(|cb| view! {
                            <button
                                class="text-xs text-muted-foreground hover:text-foreground"
                                on:click=move |_| cb.run(())
                            >
                                "Dismiss"
                            </button>
                        })}
                    </div>
                </Alert>
            }
        })
    }
}
