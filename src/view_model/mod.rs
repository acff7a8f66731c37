//! Pure projections of a raw collection: filtering, sorting, pagination and
//! the aggregates shown on dashboards.
//!
//! Nothing here performs I/O or keeps state between calls, so the same
//! `(records, filter, page_size)` always produces the same view.

mod aggregate;
mod tree;

pub(crate) use aggregate::{count_by, course_stats, order_stats, revenue_by_month, OrderStats};
pub(crate) use tree::{build_tree, flatten_tree};

use crate::models::Resource;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Facet value that disables a categorical filter.
pub(crate) const ALL: &str = "all";

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Facet {
    Status,
    Type,
    Platform,
    Category,
    Date,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum SortKey {
    /// Insertion order as returned by the backend.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    PopularityDesc,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Default => "Default",
            SortKey::PriceAsc => "Price: low to high",
            SortKey::PriceDesc => "Price: high to low",
            SortKey::RatingDesc => "Top rated",
            SortKey::PopularityDesc => "Most popular",
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ViewMode {
    #[default]
    List,
    Grid,
    Tree,
}

/// Client-only filter state of one list page. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FilterState {
    pub query: String,
    pub facets: BTreeMap<Facet, String>,
    pub sort: SortKey,
    pub view_mode: ViewMode,
    /// 1-based.
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            facets: BTreeMap::new(),
            sort: SortKey::Default,
            view_mode: ViewMode::List,
            page: 1,
        }
    }
}

impl FilterState {
    // Every filter change goes back to page 1 so the current page can never
    // point past the end of the filtered collection.

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn set_facet(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        if is_disabled(&value) {
            self.facets.remove(&facet);
        } else {
            self.facets.insert(facet, value);
        }
        self.page = 1;
    }

    pub fn clear_facet(&mut self, facet: Facet) {
        self.facets.remove(&facet);
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn facet_value(&self, facet: Facet) -> &str {
        self.facets.get(&facet).map(String::as_str).unwrap_or(ALL)
    }

    pub fn active_facets(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.facets
            .iter()
            .filter(|(_, v)| !is_disabled(v))
            .map(|(f, v)| (*f, v.as_str()))
    }

    pub fn is_filtered(&self) -> bool {
        !self.query.trim().is_empty() || self.active_facets().next().is_some()
    }
}

fn is_disabled(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case(ALL)
}

/// Case-insensitive substring match over the record's search fields.
pub(crate) fn matches_query<R: Resource>(record: &R, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub(crate) fn matches_facet<R: Resource>(record: &R, facet: Facet, value: &str) -> bool {
    if is_disabled(value) {
        return true;
    }
    record
        .facet(facet)
        .map(|v| v.trim().eq_ignore_ascii_case(value.trim()))
        .unwrap_or(false)
}

/// A record passes iff it passes the query and every active facet.
pub(crate) fn matches<R: Resource>(record: &R, filter: &FilterState) -> bool {
    matches_query(record, &filter.query)
        && filter
            .active_facets()
            .all(|(facet, value)| matches_facet(record, facet, value))
}

pub(crate) fn filter_records<'a, R: Resource>(records: &'a [R], filter: &FilterState) -> Vec<&'a R> {
    records.iter().filter(|r| matches(*r, filter)).collect()
}

pub(crate) fn compare<R: Resource>(a: &R, b: &R, key: SortKey) -> Ordering {
    let price = |r: &R| r.price().unwrap_or(0.0);
    let rating = |r: &R| r.rating().unwrap_or(0.0);
    let popularity = |r: &R| r.popularity().unwrap_or(0);

    match key {
        SortKey::Default => Ordering::Equal,
        SortKey::PriceAsc => price(a).total_cmp(&price(b)),
        SortKey::PriceDesc => price(b).total_cmp(&price(a)),
        SortKey::RatingDesc => rating(b).total_cmp(&rating(a)),
        SortKey::PopularityDesc => popularity(b).cmp(&popularity(a)),
    }
}

/// Stable sort; `SortKey::Default` keeps insertion order.
pub(crate) fn sort_records<R: Resource>(records: &mut [&R], key: SortKey) {
    if key == SortKey::Default {
        return;
    }
    records.sort_by(|a, b| compare(*a, *b, key));
}

pub(crate) fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamp a 1-based page into `[1, max(1, total_pages)]`.
pub(crate) fn clamp_page(page: usize, count: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(count, page_size).max(1))
}

/// Slice `[(page-1)*size, page*size)` of `items`; out-of-range pages are empty.
pub(crate) fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    let size = page_size.max(1);
    let start = page.max(1).saturating_sub(1).saturating_mul(size);
    if start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(size).min(items.len());
    items[start..end].to_vec()
}

/// One rendered page of a list.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ListView<R> {
    pub items: Vec<R>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
}

impl<R> ListView<R> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Filter, sort and paginate in one pass.
pub(crate) fn compute_view<R: Resource>(
    records: &[R],
    filter: &FilterState,
    page_size: usize,
) -> ListView<R> {
    let mut filtered = filter_records(records, filter);
    sort_records(&mut filtered, filter.sort);

    let filtered_count = filtered.len();
    let page = clamp_page(filter.page, filtered_count, page_size);
    let items = paginate(&filtered, page, page_size)
        .into_iter()
        .cloned()
        .collect();

    ListView {
        items,
        page,
        total_pages: total_pages(filtered_count, page_size),
        filtered_count,
        total_count: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;

    fn course(id: &str, title: &str, status: &str, price: f64) -> Course {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "title": title,
            "status": status,
            "price": price,
        }))
        .expect("course fixture")
    }

    fn ids<R: Resource>(items: &[R]) -> Vec<String> {
        items.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn test_end_to_end_filter_scenario() {
        let records = vec![
            course("1", "Intro to Go", "approved", 100.0),
            course("2", "Intro to Rust", "pending", 200.0),
        ];

        let mut filter = FilterState::default();
        filter.set_query("Intro");
        filter.set_facet(Facet::Status, "approved");
        let view = compute_view(&records, &filter, 10);
        assert_eq!(ids(&view.items), vec!["1"]);
        assert_eq!(view.items[0], records[0]);

        filter.set_facet(Facet::Status, ALL);
        let view = compute_view(&records, &filter, 10);
        assert_eq!(ids(&view.items), vec!["1", "2"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let c = course("1", "Intro to Rust", "approved", 0.0);
        assert!(matches_query(&c, "  rUsT "));
        assert!(!matches_query(&c, "python"));
        assert!(matches_query(&c, ""));
    }

    #[test]
    fn test_facet_without_value_never_matches() {
        let c = course("1", "t", "approved", 0.0);
        assert!(!matches_facet(&c, Facet::Platform, "zoom"));
        assert!(matches_facet(&c, Facet::Platform, "all"));
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut filter = FilterState {
            page: 4,
            ..FilterState::default()
        };
        filter.set_sort(SortKey::PriceAsc);
        assert_eq!(filter.page, 1);

        filter.page = 3;
        filter.set_query("x");
        assert_eq!(filter.page, 1);
    }

    #[test]
    fn test_compute_view_clamps_stale_page() {
        let records: Vec<Course> = (0..25)
            .map(|i| course(&i.to_string(), "c", "approved", i as f64))
            .collect();
        let filter = FilterState {
            page: 9,
            ..FilterState::default()
        };
        let view = compute_view(&records, &filter, 10);
        assert_eq!(view.page, 3);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.items.len(), 5);
        assert_eq!(view.filtered_count, 25);
    }

    #[test]
    fn test_empty_collection_is_page_one_of_zero() {
        let records: Vec<Course> = Vec::new();
        let view = compute_view(&records, &FilterState::default(), 8);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 0);
        assert!(view.is_empty());
    }

    #[test]
    fn test_sort_price_and_default_order() {
        let records = vec![
            course("a", "a", "approved", 30.0),
            course("b", "b", "approved", 10.0),
            course("c", "c", "approved", 20.0),
        ];
        let mut refs: Vec<&Course> = records.iter().collect();
        sort_records(&mut refs, SortKey::PriceAsc);
        let order: Vec<&str> = refs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);

        let mut refs: Vec<&Course> = records.iter().collect();
        sort_records(&mut refs, SortKey::Default);
        let order: Vec<&str> = refs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let records = vec![
            course("first", "x", "approved", 10.0),
            course("second", "y", "approved", 10.0),
        ];
        let mut refs: Vec<&Course> = records.iter().collect();
        sort_records(&mut refs, SortKey::PriceDesc);
        assert_eq!(refs[0].id, "first");
    }

    #[test]
    fn test_paginate_out_of_range() {
        let items = vec![1, 2, 3];
        assert_eq!(paginate(&items, 2, 2), vec![3]);
        assert!(paginate(&items, 3, 2).is_empty());
        assert_eq!(paginate(&items, 0, 2), vec![1, 2]);
    }

    #[test]
    fn test_sort_key_round_trips_through_strum() {
        use std::str::FromStr;
        assert_eq!(SortKey::PopularityDesc.to_string(), "popularity-desc");
        assert_eq!(SortKey::from_str("price-asc").ok(), Some(SortKey::PriceAsc));
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let records = vec![
            course("1", "Intro to Go", "approved", 100.0),
            course("2", "Intro to Rust", "pending", 200.0),
        ];
        let mut filter = FilterState::default();
        filter.set_sort(SortKey::PriceDesc);
        assert_eq!(
            compute_view(&records, &filter, 1),
            compute_view(&records, &filter, 1)
        );
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use crate::models::Course;
    use proptest::prelude::*;

    fn arb_course(id: usize) -> impl Strategy<Value = Course> {
        (
            prop::sample::select(vec!["Intro to Go", "Intro to Rust", "Advanced SQL", "Design"]),
            prop::sample::select(vec!["pending", "approved", "rejected"]),
            prop::sample::select(vec!["beginner", "advanced"]),
            0u32..500,
            0u32..50,
            0u64..1000,
        )
            .prop_map(move |(title, status, level, price, rating, enrolled)| {
                serde_json::from_value(serde_json::json!({
                    "_id": id.to_string(),
                    "title": title,
                    "status": status,
                    "level": level,
                    "price": price,
                    "rating": f64::from(rating) / 10.0,
                    "totalEnrollments": enrolled,
                }))
                .expect("course strategy")
            })
    }

    fn arb_courses() -> impl Strategy<Value = Vec<Course>> {
        (0usize..40).prop_flat_map(|n| (0..n).map(arb_course).collect::<Vec<_>>())
    }

    fn arb_filter() -> impl Strategy<Value = FilterState> {
        (
            prop::sample::select(vec!["", "intro", "RUST", "sql", "zzz"]),
            prop::sample::select(vec!["all", "pending", "approved", "rejected"]),
            prop::sample::select(vec!["all", "beginner", "advanced"]),
            prop::sample::select(vec![
                SortKey::Default,
                SortKey::PriceAsc,
                SortKey::PriceDesc,
                SortKey::RatingDesc,
                SortKey::PopularityDesc,
            ]),
        )
            .prop_map(|(query, status, level, sort)| {
                let mut f = FilterState::default();
                f.set_query(query);
                f.set_facet(Facet::Status, status);
                f.set_facet(Facet::Type, level);
                f.set_sort(sort);
                f
            })
    }

    proptest! {
        #[test]
        fn filter_is_and_of_individual_predicates(records in arb_courses(), filter in arb_filter()) {
            let composed: Vec<&str> = filter_records(&records, &filter)
                .into_iter()
                .map(|c| c.id.as_str())
                .collect();

            let manual: Vec<&str> = records
                .iter()
                .filter(|c| {
                    matches_query(*c, &filter.query)
                        && matches_facet(*c, Facet::Status, filter.facet_value(Facet::Status))
                        && matches_facet(*c, Facet::Type, filter.facet_value(Facet::Type))
                })
                .map(|c| c.id.as_str())
                .collect();

            prop_assert_eq!(composed, manual);
        }

        #[test]
        fn pages_concatenate_to_the_sorted_collection(
            records in arb_courses(),
            filter in arb_filter(),
            page_size in 1usize..15,
        ) {
            let mut expected = filter_records(&records, &filter);
            sort_records(&mut expected, filter.sort);
            let expected: Vec<Course> = expected.into_iter().cloned().collect();

            let pages = total_pages(expected.len(), page_size);
            let mut concatenated = Vec::new();
            for page in 1..=pages {
                let mut f = filter.clone();
                f.page = page;
                let view = compute_view(&records, &f, page_size);
                prop_assert_eq!(view.page, page);
                prop_assert!(view.items.len() <= page_size);
                concatenated.extend(view.items);
            }

            prop_assert_eq!(concatenated, expected);
        }

        #[test]
        fn sorting_twice_is_idempotent(
            records in arb_courses(),
            key in prop::sample::select(vec![
                SortKey::Default,
                SortKey::PriceAsc,
                SortKey::PriceDesc,
                SortKey::RatingDesc,
                SortKey::PopularityDesc,
            ]),
        ) {
            let mut once: Vec<&Course> = records.iter().collect();
            sort_records(&mut once, key);
            let mut twice = once.clone();
            sort_records(&mut twice, key);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn clamped_page_is_always_in_range(page in 0usize..100, count in 0usize..200, size in 1usize..20) {
            let p = clamp_page(page, count, size);
            prop_assert!(p >= 1);
            prop_assert!(p <= total_pages(count, size).max(1));
        }
    }
}
