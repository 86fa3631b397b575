//! The pure half of the list pipeline: query bookkeeping, text search over
//! named (dotted) fields, client-side pagination and response unwrapping.
//!
//! Collection endpoints accept `page`/`limit` but do not honor them
//! consistently, so every screen re-paginates the fetched set here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page sizes offered by list screens. Report screens may use larger ones.
pub const PAGE_LIMITS: [usize; 5] = [10, 20, 30, 40, 50];

pub const DEFAULT_LIMIT: usize = 10;

/// Filter, search and pagination state of one list screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Screen-specific filter values, e.g. `warehouseId`, `productId`.
    pub filters: BTreeMap<String, String>,
    /// 1-based page index.
    pub page: usize,
    pub limit: usize,
    /// Per-column substring patterns, matched case-insensitively and ANDed.
    pub search_terms: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: BTreeMap::new(),
            page: 1,
            limit: DEFAULT_LIMIT,
            search_terms: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    /// Set or clear one filter value. Clearing means removing the key;
    /// empty strings never reach the query string.
    pub fn set_filter(&mut self, name: &str, value: Option<String>) {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => {
                self.filters.insert(name.to_string(), v);
            }
            None => {
                self.filters.remove(name);
            }
        }
    }

    /// Changing the page size always jumps back to the first page.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_search(&mut self, column: &str, term: Option<String>) {
        match term.filter(|t| !t.is_empty()) {
            Some(t) => {
                self.search_terms.insert(column.to_string(), t);
            }
            None => {
                self.search_terms.remove(column);
            }
        }
        self.page = 1;
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.len() + self.search_terms.len()
    }
}

/// One page of a list plus the page count it was sliced from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    pub page_items: Vec<Value>,
    pub total_pages: usize,
}

/// Slice `items` into the requested page.
///
/// Stable (no reordering) and clamping: a page beyond the end yields an
/// empty `page_items`, never an error. Empty input yields `total_pages = 0`.
pub fn paginate(items: &[Value], page: usize, limit: usize) -> ListPage {
    let limit = limit.max(1);
    let page = page.max(1);
    let total_pages = items.len().div_ceil(limit);
    let start = (page - 1).saturating_mul(limit);
    let page_items = if start >= items.len() {
        Vec::new()
    } else {
        items[start..(start + limit).min(items.len())].to_vec()
    };
    ListPage {
        page_items,
        total_pages,
    }
}

/// Resolve a dotted path like `product.name` against a JSON row.
pub fn lookup_field<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(item, |value, key| value.get(key))
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Keep only items matching every search term on its named field,
/// case-insensitively. Items missing a searched field are dropped.
pub fn apply_search(items: &[Value], terms: &BTreeMap<String, String>) -> Vec<Value> {
    if terms.is_empty() {
        return items.to_vec();
    }
    let lowered: Vec<(&String, String)> = terms
        .iter()
        .filter(|(_, pattern)| !pattern.is_empty())
        .map(|(column, pattern)| (column, pattern.to_lowercase()))
        .collect();
    items
        .iter()
        .filter(|item| {
            lowered.iter().all(|(column, pattern)| {
                lookup_field(item, column)
                    .map(|v| field_text(v).to_lowercase().contains(pattern.as_str()))
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect()
}

/// Locate the payload array in a list response.
///
/// Endpoints disagree on shape, so the attempts are ordered: the named
/// resource key (`employees`, `purchaseOrders`, ...), then the generic
/// `data` key, then the body itself if it already is an array.
pub fn unwrap_collection(body: &Value, resource_key: &str) -> Option<Vec<Value>> {
    if let Some(Value::Array(items)) = body.get(resource_key) {
        return Some(items.clone());
    }
    if let Some(Value::Array(items)) = body.get("data") {
        return Some(items.clone());
    }
    if let Value::Array(items) = body {
        return Some(items.clone());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbered(n: usize) -> Vec<Value> {
        (1..=n).map(|i| json!({ "id": i })).collect()
    }

    #[test]
    fn test_paginate_slices() {
        let items = numbered(23);
        for (page, expected_len) in [(1, 10), (2, 10), (3, 3)] {
            let result = paginate(&items, page, 10);
            assert_eq!(result.total_pages, 3);
            assert_eq!(result.page_items.len(), expected_len);
            assert_eq!(result.page_items[0], items[(page - 1) * 10]);
            assert_eq!(
                result.page_items,
                items[(page - 1) * 10..(page * 10).min(items.len())].to_vec()
            );
        }
    }

    #[test]
    fn test_paginate_clamps_past_the_end() {
        let items = numbered(23);
        let result = paginate(&items, 4, 10);
        assert_eq!(result.total_pages, 3);
        assert!(result.page_items.is_empty());
    }

    #[test]
    fn test_paginate_empty_input() {
        let result = paginate(&[], 1, 10);
        assert_eq!(result.total_pages, 0);
        assert!(result.page_items.is_empty());
    }

    #[test]
    fn test_limit_change_resets_page() {
        let mut query = ListQuery::default();
        query.set_page(3);
        assert_eq!(query.page, 3);
        query.set_limit(20);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn test_end_to_end_scenario() {
        // 23 items, limit 10 -> 3 pages; switching to limit 20 resets to
        // page 1 and yields 2 pages of 20 + 3.
        let items = numbered(23);
        let mut query = ListQuery::default();

        let page1 = paginate(&items, query.page, query.limit);
        assert_eq!(page1.total_pages, 3);
        assert_eq!(page1.page_items, items[0..10].to_vec());

        query.set_page(3);
        let page3 = paginate(&items, query.page, query.limit);
        assert_eq!(page3.page_items, items[20..23].to_vec());

        query.set_limit(20);
        assert_eq!(query.page, 1);
        let page1_again = paginate(&items, query.page, query.limit);
        assert_eq!(page1_again.total_pages, 2);
        assert_eq!(page1_again.page_items, items[0..20].to_vec());
    }

    fn search_fixture() -> Vec<Value> {
        vec![
            json!({ "reason": "Water damage", "product": { "name": "Drill" } }),
            json!({ "reason": "Crushed in transit", "product": { "name": "Drill bits" } }),
            json!({ "reason": "Water damage", "product": { "name": "Sander" } }),
            json!({ "reason": "Expired", "product": { "name": "Glue" } }),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_and_nested() {
        let items = search_fixture();
        let mut terms = BTreeMap::new();
        terms.insert("product.name".to_string(), "drill".to_string());
        let found = apply_search(&items, &terms);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_search_terms_are_anded() {
        let items = search_fixture();

        let mut by_reason = BTreeMap::new();
        by_reason.insert("reason".to_string(), "water".to_string());
        let reason_set = apply_search(&items, &by_reason);

        let mut by_name = BTreeMap::new();
        by_name.insert("product.name".to_string(), "drill".to_string());
        let name_set = apply_search(&items, &by_name);

        let mut both = BTreeMap::new();
        both.extend(by_reason);
        both.extend(by_name);
        let combined = apply_search(&items, &both);

        // AND-composition: the combined set is the intersection.
        let intersection: Vec<Value> = reason_set
            .into_iter()
            .filter(|item| name_set.contains(item))
            .collect();
        assert_eq!(combined, intersection);
        assert_eq!(combined.len(), 1);
    }

    #[test]
    fn test_search_drops_items_missing_the_field() {
        let items = vec![json!({ "reason": "Expired" }), json!({ "other": 1 })];
        let mut terms = BTreeMap::new();
        terms.insert("reason".to_string(), "exp".to_string());
        assert_eq!(apply_search(&items, &terms).len(), 1);
    }

    #[test]
    fn test_unwrap_prefers_resource_key() {
        let body = json!({
            "employees": [{ "id": 1 }],
            "data": [{ "id": 2 }],
        });
        let items = unwrap_collection(&body, "employees").unwrap();
        assert_eq!(items, vec![json!({ "id": 1 })]);
    }

    #[test]
    fn test_unwrap_falls_back_to_data_then_bare_array() {
        let body = json!({ "data": [{ "id": 2 }] });
        assert_eq!(
            unwrap_collection(&body, "employees").unwrap(),
            vec![json!({ "id": 2 })]
        );

        let body = json!([{ "id": 3 }]);
        assert_eq!(
            unwrap_collection(&body, "employees").unwrap(),
            vec![json!({ "id": 3 })]
        );

        assert!(unwrap_collection(&json!({ "message": "ok" }), "employees").is_none());
    }

    #[test]
    fn test_set_filter_removes_empty_values() {
        let mut query = ListQuery::default();
        query.set_filter("warehouseId", Some("12".to_string()));
        assert_eq!(query.filter("warehouseId"), Some("12"));
        query.set_filter("warehouseId", Some(String::new()));
        assert_eq!(query.filter("warehouseId"), None);
    }
}
