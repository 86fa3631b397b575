//! Purchase order endpoints. With exactly one discriminating filter set
//! the controller prefers the nested endpoint; with none or several it
//! falls back to the generic listing with all filters as parameters.

use contracts::division::DivisionSelection;
use contracts::domain::FilterOption;
use contracts::error::ApiError;
use serde_json::Value;

use crate::shared::api::ScopedClient;
use crate::shared::list_controller::{EndpointPolicy, SpecificEndpoint};

pub const REFRESH_KEY: &str = "purchaseOrders";

/// Cascade level indexes for this screen.
pub const LEVEL_WAREHOUSE: usize = 0;
pub const LEVEL_PRODUCT: usize = 1;
pub const LEVEL_ORDER: usize = 2;

pub fn endpoint_policy() -> EndpointPolicy {
    EndpointPolicy {
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
    }
}

/// Option list for one cascade level, scoped by the parent value.
pub async fn fetch_options(
    level: usize,
    parent: &str,
    selection: Option<&DivisionSelection>,
) -> Result<Vec<FilterOption>, ApiError> {
    let client = ScopedClient::new();
    match level {
        LEVEL_WAREHOUSE => {
            let items = client
                .get_collection("/api/warehouses", &[], selection, "warehouses")
                .await?;
            Ok(to_options(items, "name"))
        }
        LEVEL_PRODUCT => {
            let items = client
                .get_collection(
                    &format!("/api/warehouses/{}/products", parent),
                    &[],
                    selection,
                    "products",
                )
                .await?;
            Ok(to_options(items, "name"))
        }
        LEVEL_ORDER => {
            let items = client
                .get_collection(
                    &format!("/api/products/{}/purchase-orders", parent),
                    &[],
                    selection,
                    "purchaseOrders",
                )
                .await?;
            Ok(to_options(items, "orderNumber"))
        }
        _ => Ok(Vec::new()),
    }
}

fn to_options(items: Vec<Value>, label_field: &str) -> Vec<FilterOption> {
    items
        .into_iter()
        .filter_map(|item| {
            let id = match item.get("id")? {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let label = item
                .get(label_field)
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| id.clone());
            Some(FilterOption::new(id, label))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_options_handles_numeric_ids_and_missing_labels() {
        let items = vec![
            json!({ "id": 7, "name": "Main warehouse" }),
            json!({ "id": "w2" }),
            json!({ "name": "no id" }),
        ];
        let options = to_options(items, "name");
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id, "7");
        assert_eq!(options[0].label, "Main warehouse");
        assert_eq!(options[1].label, "w2");
    }
}
