//! List controller: one in-memory collection of a resource type plus its
//! filter state, kept in sync with the backend by refetch-after-write.
//!
//! The controller is an explicit store. Pages subscribe to it and mirror each
//! published snapshot into a signal; nothing relies on framework reactivity.

use crate::api::{ApiClient, ApiError, ApiResult, HttpTransport, Transport};
use crate::config::ADMIN_PAGE_SIZE;
use crate::models::Resource;
use crate::view_model::{
    clamp_page, compute_view, filter_records, Facet, FilterState, ListView, SortKey, ViewMode,
};
use leptos::logging::{error, log, warn};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// What `remove` does after a successful DELETE.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum RemovePolicy {
    /// Refetch the whole collection.
    #[default]
    Refetch,
    /// Drop the record locally without a round-trip.
    LocalSplice,
}

/// Which refresh response wins when several are in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Only the most recently issued refresh may apply; older responses are
    /// discarded whenever they arrive.
    #[default]
    LatestIssued,
    /// Every response applies, so the one that resolves last wins.
    #[cfg_attr(not(test), allow(dead_code))]
    LatestResolved,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ControllerConfig {
    pub list_path: String,
    pub page_size: usize,
    pub remove_policy: RemovePolicy,
    pub resolution: Resolution,
}

impl ControllerConfig {
    /// Admin table over `GET /{collection}/admin/all`.
    pub fn admin<R: Resource>() -> Self {
        Self {
            list_path: R::list_path(),
            page_size: ADMIN_PAGE_SIZE,
            remove_policy: RemovePolicy::Refetch,
            resolution: Resolution::LatestIssued,
        }
    }

    /// Public listing over `GET /{collection}`.
    pub fn public<R: Resource>(page_size: usize) -> Self {
        Self {
            list_path: R::public_list_path(),
            page_size,
            ..Self::admin::<R>()
        }
    }

    pub fn with_remove_policy(mut self, policy: RemovePolicy) -> Self {
        self.remove_policy = policy;
        self
    }

    #[cfg(test)]
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }
}

/// Everything a page renders from.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ListSnapshot<R> {
    pub records: Vec<R>,
    pub filter: FilterState,
    pub loading: bool,
    /// At least one refresh has succeeded.
    pub loaded: bool,
    pub load_error: Option<ApiError>,
    pub mutating: bool,
    /// Message of the last failed create/update/remove, for the banner.
    pub mutation_error: Option<String>,
}

impl<R> Default for ListSnapshot<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            filter: FilterState::default(),
            loading: false,
            loaded: false,
            load_error: None,
            mutating: false,
            mutation_error: None,
        }
    }
}

impl<R: Resource> ListSnapshot<R> {
    pub fn view(&self, page_size: usize) -> ListView<R> {
        compute_view(&self.records, &self.filter, page_size)
    }
}

/// Issued by `begin_refresh`, redeemed by `finish_refresh`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RefreshTicket(u64);

type Listener<R> = Arc<dyn Fn(&ListSnapshot<R>) + Send + Sync>;

struct Inner<R> {
    state: ListSnapshot<R>,
    generation: u64,
    detached: bool,
    next_listener_id: u64,
    listeners: Vec<(u64, Listener<R>)>,
}

#[derive(Clone)]
pub(crate) struct ListController<R: Resource, T: Transport = HttpTransport> {
    client: ApiClient<T>,
    config: ControllerConfig,
    inner: Arc<Mutex<Inner<R>>>,
}

impl<R: Resource, T: Transport> ListController<R, T> {
    pub fn new(client: ApiClient<T>, config: ControllerConfig) -> Self {
        Self {
            client,
            config,
            inner: Arc::new(Mutex::new(Inner {
                state: ListSnapshot::default(),
                generation: 0,
                detached: false,
                next_listener_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `f` to the state and publish the result to every listener.
    ///
    /// Listeners run after the lock is released so they may call back into
    /// the controller.
    fn mutate<X>(&self, f: impl FnOnce(&mut Inner<R>) -> X) -> X {
        let (out, snapshot, listeners) = {
            let mut inner = self.lock();
            let out = f(&mut inner);
            let listeners: Vec<Listener<R>> =
                inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (out, inner.state.clone(), listeners)
        };
        for listener in listeners {
            listener(&snapshot);
        }
        out
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size.max(1)
    }

    pub fn snapshot(&self) -> ListSnapshot<R> {
        self.lock().state.clone()
    }

    pub fn view(&self) -> ListView<R> {
        self.snapshot().view(self.page_size())
    }

    pub fn is_detached(&self) -> bool {
        self.lock().detached
    }

    /// Register a listener; returns a handle for `unsubscribe`.
    pub fn subscribe(&self, listener: impl Fn(&ListSnapshot<R>) + Send + Sync + 'static) -> u64 {
        let mut inner = self.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: u64) {
        self.lock().listeners.retain(|(l, _)| *l != id);
    }

    /// Stop accepting responses. Called when the owning page unmounts.
    pub fn detach(&self) {
        let mut inner = self.lock();
        inner.detached = true;
        inner.generation += 1;
        inner.listeners.clear();
    }

    pub fn begin_refresh(&self) -> RefreshTicket {
        if self.is_detached() {
            return RefreshTicket(self.lock().generation);
        }
        self.mutate(|inner| {
            inner.generation += 1;
            inner.state.loading = true;
            inner.state.load_error = None;
            RefreshTicket(inner.generation)
        })
    }

    /// Apply a refresh result. Returns `false` when the result was discarded.
    ///
    /// On failure the collection is left as last-known-good.
    pub fn finish_refresh(&self, ticket: RefreshTicket, result: ApiResult<Vec<R>>) -> bool {
        {
            let inner = self.lock();
            if inner.detached {
                log!("[{}] response after detach discarded", R::COLLECTION);
                return false;
            }
            if self.config.resolution == Resolution::LatestIssued && ticket.0 != inner.generation
            {
                log!(
                    "[{}] stale response discarded (generation {} < {})",
                    R::COLLECTION,
                    ticket.0,
                    inner.generation
                );
                return false;
            }
        }

        let page_size = self.page_size();
        self.mutate(|inner| {
            match result {
                Ok(records) => {
                    log!("[{}] loaded {} records", R::COLLECTION, records.len());
                    inner.state.records = records;
                    inner.state.loaded = true;
                    inner.state.load_error = None;
                }
                Err(e) => {
                    error!("[{}] refresh failed: {e}", R::COLLECTION);
                    inner.state.load_error = Some(e);
                }
            }
            if ticket.0 == inner.generation {
                inner.state.loading = false;
            }
            let count = filter_records(&inner.state.records, &inner.state.filter).len();
            inner.state.filter.page = clamp_page(inner.state.filter.page, count, page_size);
        });
        true
    }

    /// Replace the collection with the backend's. Returns `false` when the
    /// response was discarded as stale.
    pub async fn refresh(&self) -> bool {
        let ticket = self.begin_refresh();
        let result = self.client.list::<R>(&self.config.list_path).await;
        self.finish_refresh(ticket, result)
    }

    fn begin_mutation(&self) {
        self.mutate(|inner| {
            inner.state.mutating = true;
            inner.state.mutation_error = None;
        });
    }

    fn fail_mutation(&self, action: &str, e: &ApiError) {
        warn!("[{}] {action} failed: {e}", R::COLLECTION);
        let message = e.user_message();
        self.mutate(|inner| {
            inner.state.mutating = false;
            inner.state.mutation_error = Some(message);
        });
    }

    fn end_mutation(&self) {
        self.mutate(|inner| inner.state.mutating = false);
    }

    async fn refetch_after_write(&self) {
        if !self.is_detached() {
            self.refresh().await;
        }
    }

    /// POST the payload, then refetch. The collection is untouched on failure.
    ///
    /// No idempotency key is sent: calling this twice creates twice.
    pub async fn create(&self, payload: Value) -> ApiResult<Value> {
        self.begin_mutation();
        match self.client.create::<R>(payload).await {
            Ok(created) => {
                log!("[{}] created", R::COLLECTION);
                self.end_mutation();
                self.refetch_after_write().await;
                Ok(created)
            }
            Err(e) => {
                self.fail_mutation("create", &e);
                Err(e)
            }
        }
    }

    /// PATCH a partial payload, then refetch.
    pub async fn update(&self, id: &str, payload: Value) -> ApiResult<Value> {
        self.begin_mutation();
        match self.client.update::<R>(id, payload).await {
            Ok(updated) => {
                log!("[{}] updated {id}", R::COLLECTION);
                self.end_mutation();
                self.refetch_after_write().await;
                Ok(updated)
            }
            Err(e) => {
                self.fail_mutation("update", &e);
                Err(e)
            }
        }
    }

    /// DELETE, then refetch or splice locally per `RemovePolicy`.
    pub async fn remove(&self, id: &str) -> ApiResult<()> {
        self.begin_mutation();
        if let Err(e) = self.client.remove::<R>(id).await {
            self.fail_mutation("delete", &e);
            return Err(e);
        }

        log!("[{}] deleted {id}", R::COLLECTION);
        match self.config.remove_policy {
            RemovePolicy::Refetch => {
                self.end_mutation();
                self.refetch_after_write().await;
            }
            RemovePolicy::LocalSplice => {
                let page_size = self.page_size();
                self.mutate(|inner| {
                    // A refresh already in flight predates the delete.
                    inner.generation += 1;
                    inner.state.loading = false;
                    inner.state.mutating = false;
                    inner.state.records.retain(|r| r.id() != id);
                    let count = filter_records(&inner.state.records, &inner.state.filter).len();
                    inner.state.filter.page =
                        clamp_page(inner.state.filter.page, count, page_size);
                });
            }
        }
        Ok(())
    }

    pub fn clear_mutation_error(&self) {
        self.mutate(|inner| inner.state.mutation_error = None);
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.mutate(|inner| inner.state.filter.set_query(query));
    }

    pub fn set_facet(&self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        self.mutate(|inner| inner.state.filter.set_facet(facet, value));
    }

    pub fn clear_facet(&self, facet: Facet) {
        self.mutate(|inner| inner.state.filter.clear_facet(facet));
    }

    pub fn set_sort(&self, sort: SortKey) {
        self.mutate(|inner| inner.state.filter.set_sort(sort));
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.mutate(|inner| inner.state.filter.view_mode = mode);
    }

    pub fn reset_filters(&self) {
        self.mutate(|inner| {
            let mode = inner.state.filter.view_mode;
            inner.state.filter = FilterState {
                view_mode: mode,
                ..FilterState::default()
            };
        });
    }

    /// Jump to a page, clamped to the filtered collection.
    pub fn set_page(&self, page: usize) {
        let page_size = self.page_size();
        self.mutate(|inner| {
            let count = filter_records(&inner.state.records, &inner.state.filter).len();
            inner.state.filter.page = clamp_page(page, count, page_size);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{ok_envelope, ScriptedTransport};
    use crate::models::Course;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn course_json(id: &str, title: &str) -> Value {
        json!({"_id": id, "title": title, "status": "approved"})
    }

    fn course(id: &str, title: &str) -> Course {
        serde_json::from_value(course_json(id, title)).expect("course fixture")
    }

    fn controller(
        transport: &ScriptedTransport,
        config: ControllerConfig,
    ) -> ListController<Course, ScriptedTransport> {
        ListController::new(ApiClient::new(transport.clone()), config)
    }

    fn ids(snapshot: &ListSnapshot<Course>) -> Vec<String> {
        snapshot.records.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_config_paths() {
        let admin = ControllerConfig::admin::<Course>();
        assert_eq!(admin.list_path, "/courses/admin/all");
        assert_eq!(admin.page_size, ADMIN_PAGE_SIZE);
        assert_eq!(admin.resolution, Resolution::LatestIssued);

        let public = ControllerConfig::public::<Course>(8);
        assert_eq!(public.list_path, "/courses");
        assert_eq!(public.page_size, 8);
    }

    #[tokio::test]
    async fn test_refresh_replaces_collection() {
        let transport = ScriptedTransport::default();
        transport.reply(
            200,
            json!({"success": true, "data": [course_json("1", "Intro to Go")]}),
        );
        let c = controller(&transport, ControllerConfig::admin::<Course>());

        assert!(c.refresh().await);
        let snap = c.snapshot();
        assert_eq!(ids(&snap), vec!["1"]);
        assert!(snap.loaded);
        assert!(!snap.loading);
        assert!(snap.load_error.is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_known_good() {
        let transport = ScriptedTransport::default();
        transport.reply(200, json!([course_json("1", "a"), course_json("2", "b")]));
        transport.fail_network("offline");
        let c = controller(&transport, ControllerConfig::admin::<Course>());

        c.refresh().await;
        c.refresh().await;

        let snap = c.snapshot();
        assert_eq!(ids(&snap), vec!["1", "2"]);
        assert!(matches!(snap.load_error, Some(ApiError::Network(_))));
        assert!(!snap.loading);
    }

    #[tokio::test]
    async fn test_out_of_order_responses_latest_issued_wins() {
        let transport = ScriptedTransport::default();
        let first = transport.gated();
        let second = transport.gated();
        let c = controller(&transport, ControllerConfig::admin::<Course>());
        let (c1, c2) = (c.clone(), c.clone());

        let (applied_first, applied_second, _) = tokio::join!(c1.refresh(), c2.refresh(), async {
            // The second request resolves before the first.
            let _ = second.send(ok_envelope(json!([course_json("new", "fresh")])));
            let _ = first.send(ok_envelope(json!([course_json("old", "stale")])));
        });

        assert!(!applied_first);
        assert!(applied_second);
        let snap = c.snapshot();
        assert_eq!(ids(&snap), vec!["new"]);
        assert!(!snap.loading);
    }

    #[test]
    fn test_latest_resolved_lets_last_response_win() {
        let transport = ScriptedTransport::default();
        let c = controller(
            &transport,
            ControllerConfig::admin::<Course>().with_resolution(Resolution::LatestResolved),
        );

        let t1 = c.begin_refresh();
        let t2 = c.begin_refresh();
        assert!(c.finish_refresh(t2, Ok(vec![course("new", "fresh")])));
        assert!(c.snapshot().records[0].id == "new");
        assert!(c.finish_refresh(t1, Ok(vec![course("old", "stale")])));
        assert_eq!(ids(&c.snapshot()), vec!["old"]);
    }

    #[test]
    fn test_latest_issued_discards_stale_ticket() {
        let transport = ScriptedTransport::default();
        let c = controller(&transport, ControllerConfig::admin::<Course>());

        let t1 = c.begin_refresh();
        let t2 = c.begin_refresh();
        assert!(!c.finish_refresh(t1, Ok(vec![course("old", "stale")])));
        assert!(c.snapshot().loading);
        assert!(c.finish_refresh(t2, Ok(vec![course("new", "fresh")])));
        assert_eq!(ids(&c.snapshot()), vec!["new"]);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_records_identical() {
        let transport = ScriptedTransport::default();
        transport.reply(200, json!([course_json("1", "a")]));
        transport.reply(
            400,
            json!({
                "success": false,
                "message": "Validation Error",
                "errorSources": [{"path": "title", "message": "Required"}]
            }),
        );
        let c = controller(&transport, ControllerConfig::admin::<Course>());
        c.refresh().await;
        let before = c.snapshot().records;

        let err = c.create(json!({})).await.expect_err("create should fail");
        assert!(matches!(err, ApiError::Rejected { .. }));

        let snap = c.snapshot();
        assert_eq!(snap.records, before);
        assert!(!snap.mutating);
        assert_eq!(
            snap.mutation_error.as_deref(),
            Some("Validation Error (title: Required)")
        );
        // No refetch after a failed write.
        assert_eq!(transport.requests().len(), 2);

        c.clear_mutation_error();
        assert!(c.snapshot().mutation_error.is_none());
    }

    #[tokio::test]
    async fn test_create_refetches_collection() {
        let transport = ScriptedTransport::default();
        transport.reply(201, json!({"success": true, "data": course_json("2", "b")}));
        transport.reply(200, json!([course_json("1", "a"), course_json("2", "b")]));
        let c = controller(&transport, ControllerConfig::admin::<Course>());

        let created = c.create(json!({"title": "b"})).await.expect("create ok");
        assert_eq!(created["_id"], "2");
        assert_eq!(ids(&c.snapshot()), vec!["1", "2"]);

        let sent: Vec<(Method, String)> = transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect();
        assert_eq!(
            sent,
            vec![
                (Method::POST, "/courses/create".to_string()),
                (Method::GET, "/courses/admin/all".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_repeated_create_posts_twice() {
        let transport = ScriptedTransport::default();
        for _ in 0..2 {
            transport.reply(201, json!({"success": true, "data": course_json("x", "dup")}));
            transport.reply(200, json!([course_json("x", "dup")]));
        }
        let c = controller(&transport, ControllerConfig::admin::<Course>());

        let payload = json!({"title": "dup"});
        c.create(payload.clone()).await.expect("first ok");
        c.create(payload).await.expect("second ok");

        let posts = transport
            .requests()
            .into_iter()
            .filter(|r| r.method == Method::POST)
            .count();
        assert_eq!(posts, 2);
    }

    #[tokio::test]
    async fn test_update_patches_then_refetches() {
        let transport = ScriptedTransport::default();
        transport.reply(200, json!({"success": true, "data": course_json("1", "renamed")}));
        transport.reply(200, json!([course_json("1", "renamed")]));
        let c = controller(&transport, ControllerConfig::admin::<Course>());

        c.update("1", json!({"title": "renamed"}))
            .await
            .expect("update ok");
        assert_eq!(c.snapshot().records[0].title, "renamed");
        assert_eq!(transport.requests()[0].method, Method::PATCH);
        assert_eq!(transport.requests()[0].path, "/courses/admin/1");
    }

    #[tokio::test]
    async fn test_remove_with_refetch() {
        let transport = ScriptedTransport::default();
        transport.reply(200, json!([course_json("1", "a"), course_json("2", "b")]));
        transport.reply(200, json!({"success": true, "data": null}));
        transport.reply(200, json!([course_json("2", "b")]));
        let c = controller(&transport, ControllerConfig::admin::<Course>());
        c.refresh().await;

        c.remove("1").await.expect("remove ok");
        assert_eq!(ids(&c.snapshot()), vec!["2"]);
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_remove_with_local_splice() {
        let transport = ScriptedTransport::default();
        transport.reply(200, json!([course_json("1", "a"), course_json("2", "b")]));
        transport.reply(200, json!({"success": true, "data": null}));
        let c = controller(
            &transport,
            ControllerConfig::admin::<Course>().with_remove_policy(RemovePolicy::LocalSplice),
        );
        c.refresh().await;

        c.remove("1").await.expect("remove ok");
        assert_eq!(ids(&c.snapshot()), vec!["2"]);
        // DELETE only, no refetch.
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_remove_keeps_record() {
        let transport = ScriptedTransport::default();
        transport.reply(200, json!([course_json("1", "a")]));
        transport.reply(404, json!({"success": false, "message": "Course not found"}));
        let c = controller(&transport, ControllerConfig::admin::<Course>());
        c.refresh().await;

        assert!(c.remove("1").await.is_err());
        let snap = c.snapshot();
        assert_eq!(ids(&snap), vec!["1"]);
        assert_eq!(snap.mutation_error.as_deref(), Some("Course not found"));
    }

    #[tokio::test]
    async fn test_page_clamps_after_collection_shrinks() {
        let transport = ScriptedTransport::default();
        let many: Vec<Value> = (0..25).map(|i| course_json(&i.to_string(), "c")).collect();
        transport.reply(200, Value::Array(many));
        transport.reply(200, json!([course_json("0", "c")]));
        let c = controller(&transport, ControllerConfig::admin::<Course>());

        c.refresh().await;
        c.set_page(3);
        assert_eq!(c.snapshot().filter.page, 3);
        c.set_page(7);
        assert_eq!(c.snapshot().filter.page, 3);

        c.refresh().await;
        assert_eq!(c.snapshot().filter.page, 1);
        assert_eq!(c.view().items.len(), 1);
    }

    #[test]
    fn test_filter_mutators_reset_page() {
        let transport = ScriptedTransport::default();
        let c = controller(&transport, ControllerConfig::admin::<Course>());
        let t = c.begin_refresh();
        let records: Vec<Course> = (0..30).map(|i| course(&i.to_string(), "c")).collect();
        c.finish_refresh(t, Ok(records));

        c.set_page(2);
        c.set_facet(Facet::Status, "approved");
        assert_eq!(c.snapshot().filter.page, 1);

        c.set_page(2);
        c.set_query("c");
        assert_eq!(c.snapshot().filter.page, 1);

        c.set_view_mode(ViewMode::Grid);
        c.reset_filters();
        let filter = c.snapshot().filter;
        assert!(!filter.is_filtered());
        assert_eq!(filter.view_mode, ViewMode::Grid);
    }

    #[tokio::test]
    async fn test_detach_discards_in_flight_response() {
        let transport = ScriptedTransport::default();
        let gate = transport.gated();
        let c = controller(&transport, ControllerConfig::admin::<Course>());
        let pending = c.clone();

        let (applied, _) = tokio::join!(pending.refresh(), async {
            c.detach();
            let _ = gate.send(ok_envelope(json!([course_json("1", "late")])));
        });

        assert!(!applied);
        assert!(c.snapshot().records.is_empty());
        assert!(c.is_detached());
    }

    #[test]
    fn test_subscribers_receive_snapshots() {
        let transport = ScriptedTransport::default();
        let c = controller(&transport, ControllerConfig::admin::<Course>());
        let calls = Arc::new(AtomicUsize::new(0));
        let last_query = Arc::new(Mutex::new(String::new()));

        let id = {
            let calls = calls.clone();
            let last_query = last_query.clone();
            c.subscribe(move |snap| {
                calls.fetch_add(1, Ordering::SeqCst);
                if let Ok(mut q) = last_query.lock() {
                    *q = snap.filter.query.clone();
                }
            })
        };

        c.set_query("rust");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*last_query.lock().expect("lock"), "rust");

        c.unsubscribe(id);
        c.set_query("go");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
