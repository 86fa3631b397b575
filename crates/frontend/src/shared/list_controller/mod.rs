//! The fetch → filter → paginate pipeline shared by every list screen.
//!
//! One controller instance per view. The fetched set is replaced wholesale
//! on every load; search and pagination are derived computations, so
//! narrowing a column search never triggers a network fetch.

pub mod refresh;

use contracts::error::ApiError;
use contracts::list::{apply_search, paginate, ListQuery};
use leptos::prelude::*;
use serde_json::Value;

use crate::shared::api::ScopedClient;
use crate::shared::division::DivisionContext;

/// Chooses which endpoint a screen hits for a given filter set.
#[derive(Clone, Debug)]
pub struct EndpointPolicy {
    /// Generic listing path; receives all active filters as query parameters.
    pub list_path: &'static str,
    /// JSON key the payload array lives under, tried before `data`.
    pub resource_key: &'static str,
    /// More specific endpoints, used when exactly one of the named
    /// discriminating filters is set.
    pub specific: Vec<SpecificEndpoint>,
}

#[derive(Clone, Debug)]
pub struct SpecificEndpoint {
    pub filter: &'static str,
    pub path: fn(&str) -> String,
}

impl EndpointPolicy {
    /// A screen with a single listing endpoint and no specific variants.
    pub fn plain(list_path: &'static str, resource_key: &'static str) -> Self {
        Self {
            list_path,
            resource_key,
            specific: Vec::new(),
        }
    }

    /// Pick the request shape for the current query: the specific endpoint
    /// when exactly one discriminating filter is set, otherwise the generic
    /// listing path with every filter as a query parameter.
    ///
    /// `page`/`limit` are sent for endpoints that claim to paginate, but
    /// the response is re-paginated client-side regardless — the backend
    /// does not honor them consistently.
    pub fn select(&self, query: &ListQuery) -> (String, Vec<(String, String)>) {
        let matching: Vec<&SpecificEndpoint> = self
            .specific
            .iter()
            .filter(|endpoint| query.filter(endpoint.filter).is_some())
            .collect();
        if let [endpoint] = matching.as_slice() {
            if let Some(value) = query.filter(endpoint.filter) {
                return ((endpoint.path)(value), Vec::new());
            }
        }

        let mut params: Vec<(String, String)> = query
            .filters
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        params.push(("page".to_string(), query.page.to_string()));
        params.push(("limit".to_string(), query.limit.to_string()));
        (self.list_path.to_string(), params)
    }
}

/// Signal bundle driving one list screen. `Copy`, so closures can capture
/// it freely; all mutation happens on the UI thread through these signals.
#[derive(Clone, Copy)]
pub struct ListController {
    pub query: RwSignal<ListQuery>,
    /// Raw fetched rows, replaced wholesale on every successful load.
    pub all_items: RwSignal<Vec<Value>>,
    /// `all_items` narrowed by the active search terms.
    pub filtered_items: Memo<Vec<Value>>,
    pub page_items: Memo<Vec<Value>>,
    pub total_pages: Memo<usize>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    pub error_open: RwSignal<bool>,
    /// Set after the first successful load; distinguishes "not loaded yet"
    /// from a genuinely empty result.
    pub loaded: RwSignal<bool>,
    division: DivisionContext,
    policy: StoredValue<EndpointPolicy>,
    client: StoredValue<ScopedClient>,
    /// Monotonic request sequence; a resolved-but-superseded response must
    /// not commit after a newer load was initiated.
    seq: RwSignal<u64>,
}

impl ListController {
    pub fn new(policy: EndpointPolicy, division: DivisionContext) -> Self {
        Self::with_client(policy, division, ScopedClient::new())
    }

    pub fn with_client(
        policy: EndpointPolicy,
        division: DivisionContext,
        client: ScopedClient,
    ) -> Self {
        let query = RwSignal::new(ListQuery::default());
        let all_items = RwSignal::new(Vec::<Value>::new());
        let filtered_items = Memo::new(move |_| {
            let terms = query.with(|q| q.search_terms.clone());
            all_items.with(|items| apply_search(items, &terms))
        });
        let paged = Memo::new(move |_| {
            let (page, limit) = query.with(|q| (q.page, q.limit));
            filtered_items.with(|items| paginate(items, page, limit))
        });
        let page_items = Memo::new(move |_| paged.with(|p| p.page_items.clone()));
        let total_pages = Memo::new(move |_| paged.with(|p| p.total_pages));
        Self {
            query,
            all_items,
            filtered_items,
            page_items,
            total_pages,
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            error_open: RwSignal::new(false),
            loaded: RwSignal::new(false),
            division,
            policy: StoredValue::new(policy),
            client: StoredValue::new(client),
            seq: RwSignal::new(0),
        }
    }

    /// Run the fetch half of the pipeline. Search and pagination are
    /// derived, so they apply to the committed set automatically.
    pub async fn load(self) {
        let my_seq = self.begin_load();
        let query = self.query.get_untracked();
        let (path, params) = self.policy.with_value(|policy| policy.select(&query));
        let resource_key = self.policy.with_value(|policy| policy.resource_key);
        let selection = self.division.selection_untracked();
        let result = self
            .client
            .get_value()
            .get_collection(&path, &params, selection.as_ref(), resource_key)
            .await;
        self.commit(my_seq, result);
    }

    /// Invalidate any in-flight load so its result is dropped on arrival:
    /// division change, unmount, or an explicit user cancel. There is no
    /// transport-level abort; requests are idempotent reads.
    pub fn invalidate(&self) {
        self.seq.update(|seq| *seq += 1);
        self.loading.set(false);
    }

    pub fn set_page(&self, page: usize) {
        self.query.update(|q| q.set_page(page));
    }

    pub fn set_limit(&self, limit: usize) {
        self.query.update(|q| q.set_limit(limit));
    }

    /// Filter changes re-fetch, so jump back to the first page too.
    pub fn set_filter(&self, name: &str, value: Option<String>) {
        self.query.update(|q| {
            q.set_filter(name, value);
            q.page = 1;
        });
    }

    pub fn set_search(&self, column: &str, term: Option<String>) {
        self.query.update(|q| q.set_search(column, term));
    }

    /// Neutral empty state: loaded, no error, nothing matched.
    pub fn is_empty(&self) -> bool {
        self.loaded.get() && self.error.with(Option::is_none) && self.filtered_items.with(Vec::is_empty)
    }

    fn begin_load(&self) -> u64 {
        self.loading.set(true);
        self.error.set(None);
        self.seq
            .try_update(|seq| {
                *seq += 1;
                *seq
            })
            .unwrap_or_default()
    }

    fn commit(&self, my_seq: u64, result: Result<Vec<Value>, ApiError>) -> bool {
        if self.seq.get_untracked() != my_seq {
            // A newer load was initiated; last initiated wins.
            return false;
        }
        self.loading.set(false);
        match result {
            Ok(items) => {
                self.all_items.set(items);
                self.loaded.set(true);
            }
            Err(err) => {
                log::error!("List load failed for {}: {}", self.policy.with_value(|p| p.list_path), err);
                self.error.set(Some(err));
                self.error_open.set(true);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn controller(policy: EndpointPolicy) -> ListController {
        ListController::new(policy, DivisionContext::new(None))
    }

    fn rows(n: usize) -> Vec<Value> {
        (1..=n).map(|i| json!({ "id": i })).collect()
    }

    #[test]
    fn test_generic_endpoint_carries_all_filters() {
        let policy = EndpointPolicy::plain("/api/purchase-orders", "purchaseOrders");
        let mut query = ListQuery::default();
        query.set_filter("warehouseId", Some("3".to_string()));
        query.set_filter("status", Some("open".to_string()));
        let (path, params) = policy.select(&query);
        assert_eq!(path, "/api/purchase-orders");
        assert!(params.contains(&("warehouseId".to_string(), "3".to_string())));
        assert!(params.contains(&("status".to_string(), "open".to_string())));
        assert!(params.contains(&("page".to_string(), "1".to_string())));
    }

    #[test]
    fn test_single_discriminating_filter_picks_specific_endpoint() {
        let policy = EndpointPolicy {
            list_path: "/api/purchase-orders",
            resource_key: "purchaseOrders",
            specific: vec![
                SpecificEndpoint {
                    filter: "warehouseId",
                    path: |id| format!("/api/warehouses/{}/purchase-orders", id),
                },
                SpecificEndpoint {
                    filter: "productId",
                    path: |id| format!("/api/products/{}/purchase-orders", id),
                },
            ],
        };

        let mut query = ListQuery::default();
        query.set_filter("warehouseId", Some("3".to_string()));
        let (path, params) = policy.select(&query);
        assert_eq!(path, "/api/warehouses/3/purchase-orders");
        assert!(params.is_empty());

        // Two discriminating filters set: fall back to the generic path.
        query.set_filter("productId", Some("9".to_string()));
        let (path, _) = policy.select(&query);
        assert_eq!(path, "/api/purchase-orders");
    }

    #[test]
    fn test_stale_response_is_suppressed() {
        let c = controller(EndpointPolicy::plain("/api/items", "items"));
        let seq_a = c.begin_load();
        let seq_b = c.begin_load();

        // B resolves first and commits.
        assert!(c.commit(seq_b, Ok(rows(2))));
        // A resolves late; its result must not overwrite B's.
        assert!(!c.commit(seq_a, Ok(rows(5))));

        assert_eq!(c.all_items.get_untracked().len(), 2);
        assert!(!c.loading.get_untracked());
    }

    #[test]
    fn test_invalidate_drops_in_flight_load() {
        let c = controller(EndpointPolicy::plain("/api/items", "items"));
        let seq = c.begin_load();
        c.invalidate();
        assert!(!c.commit(seq, Ok(rows(4))));
        assert!(c.all_items.get_untracked().is_empty());
    }

    #[test]
    fn test_commit_replaces_wholesale() {
        let c = controller(EndpointPolicy::plain("/api/items", "items"));
        let seq = c.begin_load();
        assert!(c.commit(seq, Ok(rows(23))));
        let seq = c.begin_load();
        assert!(c.commit(seq, Ok(rows(3))));
        // Replaced, not merged.
        assert_eq!(c.all_items.get_untracked().len(), 3);
    }

    #[test]
    fn test_derived_pagination_and_limit_reset() {
        let c = controller(EndpointPolicy::plain("/api/items", "items"));
        let seq = c.begin_load();
        c.commit(seq, Ok(rows(23)));

        assert_eq!(c.total_pages.get_untracked(), 3);
        assert_eq!(c.page_items.get_untracked().len(), 10);

        c.set_page(3);
        assert_eq!(c.page_items.get_untracked().len(), 3);

        c.set_limit(20);
        assert_eq!(c.query.get_untracked().page, 1);
        assert_eq!(c.total_pages.get_untracked(), 2);
        assert_eq!(c.page_items.get_untracked().len(), 20);
    }

    #[test]
    fn test_search_narrows_without_refetch() {
        let c = controller(EndpointPolicy::plain("/api/items", "items"));
        let seq = c.begin_load();
        c.commit(
            seq,
            Ok(vec![
                json!({ "name": "Drill" }),
                json!({ "name": "Drill bits" }),
                json!({ "name": "Sander" }),
            ]),
        );
        c.set_search("name", Some("drill".to_string()));
        assert_eq!(c.filtered_items.get_untracked().len(), 2);
        // The fetched set itself is untouched.
        assert_eq!(c.all_items.get_untracked().len(), 3);

        c.set_search("name", None);
        assert_eq!(c.filtered_items.get_untracked().len(), 3);
    }

    #[test]
    fn test_error_commit_opens_dialog() {
        let c = controller(EndpointPolicy::plain("/api/items", "items"));
        let seq = c.begin_load();
        c.commit(
            seq,
            Err(ApiError::HttpError {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        assert!(c.error_open.get_untracked());
        assert!(!c.is_empty());
    }
}
