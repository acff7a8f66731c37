use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Select};
use crate::view_model::{Facet, FilterState, SortKey, ViewMode, ALL};
use leptos::prelude::*;
use std::collections::BTreeMap;

/// One categorical dropdown of the filter bar.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FacetFilter {
    pub facet: Facet,
    pub label: &'static str,
    /// `(value, label)`; the leading "All" entry is added by the bar.
    pub options: Vec<(String, String)>,
}

impl FacetFilter {
    pub fn new(facet: Facet, label: &'static str, options: Vec<(String, String)>) -> Self {
        Self {
            facet,
            label,
            options,
        }
    }

    /// Options whose label is the value itself.
    pub fn plain(facet: Facet, label: &'static str, values: Vec<String>) -> Self {
        Self::new(facet, label, values.into_iter().map(|v| (v.clone(), v)).collect())
    }

    /// Options observed in the loaded data: `(value, label)` pairs,
    /// de-duplicated and sorted by label.
    pub fn observed(
        facet: Facet,
        label: &'static str,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut seen: BTreeMap<String, String> = BTreeMap::new();
        for (value, text) in pairs {
            if !value.trim().is_empty() {
                seen.entry(value).or_insert(text);
            }
        }
        let mut options: Vec<(String, String)> = seen.into_iter().collect();
        options.sort_by(|a, b| a.1.to_lowercase().cmp(&b.1.to_lowercase()));
        Self::new(facet, label, options)
    }

    fn with_all(&self) -> Vec<(String, String)> {
        std::iter::once((ALL.to_string(), format!("All {}", self.label.to_lowercase())))
            .chain(self.options.iter().cloned())
            .collect()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct FilterActions {
    pub on_query: Callback<String>,
    pub on_facet: Callback<(Facet, String)>,
    pub on_sort: Callback<SortKey>,
    pub on_view: Callback<ViewMode>,
    pub on_reset: Callback<()>,
}

#[component]
pub(crate) fn FilterBar(
    #[prop(into)] filter: Signal<FilterState>,
    #[prop(into)] facets: Signal<Vec<FacetFilter>>,
    #[prop(optional)] sort_keys: Vec<SortKey>,
    #[prop(optional)] view_modes: Vec<ViewMode>,
    #[prop(into, default = "Search...".to_string())] placeholder: String,
    actions: FilterActions,
) -> impl IntoView {
    // Local text state so typing is not overwritten by a snapshot round-trip.
    let query = RwSignal::new(filter.get_untracked().query);
    Effect::new(move |_| {
        actions.on_query.run(query.get());
    });

    let sort_options: Vec<(String, String)> = sort_keys
        .iter()
        .map(|k| (k.to_string(), k.label().to_string()))
        .collect();
    let has_sort = !sort_options.is_empty();

    let facet_selects = move || {
        facets
            .get()
            .into_iter()
            .map(|f| {
                let facet = f.facet;
                let options = f.with_all();
                view! {
                    <Select
                        class="w-40"
                        aria_label=f.label
                        options=options
                        value=Signal::derive(move || filter.get().facet_value(facet).to_string())
                        on_change=Callback::new(move |v: String| actions.on_facet.run((facet, v)))
                    />
                }
            })
            .collect_view()
    };

    let view_toggle = move || {
        let current = filter.get().view_mode;
        view_modes
            .iter()
            .copied()
            .map(|mode| {
                let variant = if current == mode {
                    ButtonVariant::Secondary
                } else {
                    ButtonVariant::Ghost
                };
                view! {
                    <Button
                        size=ButtonSize::Sm
                        variant=variant
                        attr:aria-pressed=(current == mode).to_string()
                        on:click=move |_| actions.on_view.run(mode)
                    >
                        <span class="capitalize">{mode.to_string()}</span>
                    </Button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="flex flex-wrap items-center gap-2">
            <Input class="h-9 w-56" placeholder=placeholder bind_value=query />
            {facet_selects}
            {has_sort.then(|| view! {
                <Select
                    class="w-44"
                    aria_label="Sort"
                    options=sort_options.clone()
                    value=Signal::derive(move || filter.get().sort.to_string())
                    on_change=Callback::new(move |v: String| {
                        if let Ok(key) = v.parse::<SortKey>() {
                            actions.on_sort.run(key);
                        }
                    })
                />
            })}
            <Show when=move || filter.get().is_filtered() fallback=|| ().into_view()>
                <Button
                    size=ButtonSize::Sm
                    variant=ButtonVariant::Link
                    on:click=move |_| {
                        query.set(String::new());
                        actions.on_reset.run(());
                    }
                >
                    "Clear filters"
                </Button>
            </Show>
            <div class="ml-auto flex items-center gap-1">{view_toggle}</div>
        </div>
    }
}
