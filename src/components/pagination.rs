use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use leptos::prelude::*;

/// Page numbers to show around `page`: always the first and last, plus a
/// window of `radius` on each side. `None` marks a gap.
pub(crate) fn page_window(page: usize, total: usize, radius: usize) -> Vec<Option<usize>> {
    if total == 0 {
        return Vec::new();
    }
    let page = page.clamp(1, total);
    let lo = page.saturating_sub(radius).max(1);
    let hi = (page + radius).min(total);

    let mut out = Vec::new();
    if lo > 1 {
        out.push(Some(1));
        if lo > 2 {
            out.push(None);
        }
    }
    out.extend((lo..=hi).map(Some));
    if hi < total {
        if hi + 1 < total {
            out.push(None);
        }
        out.push(Some(total));
    }
    out
}

#[component]
pub(crate) fn Pagination(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] filtered: Signal<usize>,
    #[prop(into)] total: Signal<usize>,
    on_page: Callback<usize>,
) -> impl IntoView {
    let summary = move || {
        let (f, t) = (filtered.get(), total.get());
        if f == t {
            format!("{t} records")
        } else {
            format!("{f} of {t} records")
        }
    };

    view! {
        <div class="flex items-center justify-between gap-3 pt-3 text-xs text-muted-foreground">
            <span>{summary}</span>
            <Show when=move || { total_pages.get() > 1 } fallback=|| ().into_view()>
                <nav class="flex items-center gap-1" aria-label="Pagination">
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Outline
                        attr:disabled=move || page.get() <= 1
                        on:click=move |_| on_page.run(page.get_untracked().saturating_sub(1))
                    >
                        "Prev"
                    </Button>
                    {move || {
                        page_window(page.get(), total_pages.get(), 1)
                            .into_iter()
                            .map(|p| match p {
                                Some(n) => {
                                    let variant = if n == page.get_untracked() {
                                        ButtonVariant::Default
                                    } else {
                                        ButtonVariant::Ghost
                                    };
                                    view! {
                                        <Button size=ButtonSize::Sm variant=variant on:click=move |_| on_page.run(n)>
                                            {n.to_string()}
                                        </Button>
                                    }
                                    .into_any()
                                }
                                None => view! { <span class="px-1">"…"</span> }.into_any(),
                            })
                            .collect_view()
                    }}
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Outline
                        attr:disabled=move || page.get() >= total_pages.get()
                        on:click=move |_| on_page.run(page.get_untracked() + 1)
                    >
                        "Next"
                    </Button>
                </nav>
            </Show>
        </div>
    }
}
