//! Single-shot Open Data endpoint fetching.
//!
//! The Open Data endpoints answer with either a bare JSON array or an object
//! nesting the list under an `items` or `data` key. Both shapes are handled
//! here; anything else counts as an empty source.

use crate::api::FetchJson;
use serde_json::Value;
use std::error::Error;
use tracing::{info, instrument};

/// Pull the item list out of an endpoint response body.
///
/// Array bodies are the list itself. Object bodies are searched for the first
/// non-empty array under `items`, then `data`. Any other shape yields no
/// items.
pub fn extract_items(body: &Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items.clone(),
        Value::Object(map) => ["items", "data"]
            .iter()
            .filter_map(|key| map.get(*key))
            .filter_map(Value::as_array)
            .find(|list| !list.is_empty())
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Fetch a single-shot endpoint and return its raw items.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_items<F: FetchJson>(
    fetcher: &F,
    url: &str,
) -> Result<Vec<Value>, Box<dyn Error>> {
    let body = fetcher.fetch(url).await?;
    let items = extract_items(&body);
    info!(count = items.len(), "Fetched open-data items");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_items_from_array_body() {
        let body = json!([{"title": "a"}, {"title": "b"}]);
        assert_eq!(extract_items(&body).len(), 2);
    }

    #[test]
    fn test_extract_items_from_items_key() {
        let body = json!({"items": [{"title": "a"}], "total": 1});
        assert_eq!(extract_items(&body).len(), 1);
    }

    #[test]
    fn test_extract_items_falls_back_to_data_key() {
        let body = json!({"data": [{"title": "a"}, {"title": "b"}, {"title": "c"}]});
        assert_eq!(extract_items(&body).len(), 3);
    }

    #[test]
    fn test_extract_items_skips_empty_items_for_data() {
        // An empty `items` list falls through to `data`.
        let body = json!({"items": [], "data": [{"title": "a"}]});
        assert_eq!(extract_items(&body).len(), 1);
    }

    #[test]
    fn test_extract_items_skips_null_items() {
        let body = json!({"items": null, "data": [{"title": "a"}]});
        assert_eq!(extract_items(&body).len(), 1);
    }

    #[test]
    fn test_extract_items_other_shapes_are_empty() {
        assert!(extract_items(&json!("not a list")).is_empty());
        assert!(extract_items(&json!({"total": 0})).is_empty());
        assert!(extract_items(&json!(null)).is_empty());
    }
}
