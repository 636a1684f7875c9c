//! Paginated blog search feed fetching.
//!
//! The search feed answers in fixed-size pages addressed by a `page` query
//! parameter. There is no total count in the response; the loop simply
//! increments the page counter until a page comes back empty.

use crate::api::FetchJson;
use crate::sources::opendata::extract_items;
use serde_json::Value;
use std::error::Error;
use tracing::{debug, info, instrument};

/// Fetch every page of a paginated feed.
///
/// Pages are requested sequentially starting at 1; the first empty page ends
/// the loop. A fetch error on any page aborts the whole source.
#[instrument(level = "info", skip_all, fields(%endpoint))]
pub async fn fetch_all_pages<F: FetchJson>(
    fetcher: &F,
    endpoint: &str,
) -> Result<Vec<Value>, Box<dyn Error>> {
    let mut all_items = Vec::new();
    let mut page = 1u32;

    loop {
        let url = page_url(endpoint, page);
        debug!(page, "Fetching feed page");
        let body = fetcher.fetch(&url).await?;
        let items = extract_items(&body);
        if items.is_empty() {
            break;
        }
        all_items.extend(items);
        page += 1;
    }

    info!(pages = page - 1, count = all_items.len(), "Fetched paginated feed");
    Ok(all_items)
}

/// Append the page counter to the endpoint query string.
fn page_url(endpoint: &str, page: u32) -> String {
    if endpoint.contains('?') {
        format!("{endpoint}&page={page}")
    } else {
        format!("{endpoint}?page={page}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    /// Serves pages of the given sizes, in order, then empty pages forever.
    struct PagedFetch {
        page_sizes: Vec<usize>,
        requested_urls: RefCell<Vec<String>>,
    }

    impl FetchJson for PagedFetch {
        async fn fetch(&self, url: &str) -> Result<Value, Box<dyn Error>> {
            let mut urls = self.requested_urls.borrow_mut();
            let size = self.page_sizes.get(urls.len()).copied().unwrap_or(0);
            urls.push(url.to_string());

            let items: Vec<Value> = (0..size)
                .map(|i| json!({"url": format!("/blog/{i}"), "title": "t"}))
                .collect();
            Ok(json!({ "items": items }))
        }
    }

    #[tokio::test]
    async fn test_pagination_stops_after_empty_page() {
        let fetcher = PagedFetch {
            page_sizes: vec![100, 100, 37],
            requested_urls: RefCell::new(Vec::new()),
        };

        let items = fetch_all_pages(&fetcher, "https://www.rvo.nl/api/v1/search?fq=type%3Ablog&rows=100")
            .await
            .unwrap();

        assert_eq!(items.len(), 237);
        let urls = fetcher.requested_urls.borrow();
        // Pages 1..=3 carried items; page 4 was empty and ended the loop.
        assert_eq!(urls.len(), 4);
        assert!(urls[0].ends_with("&page=1"));
        assert!(urls[3].ends_with("&page=4"));
    }

    #[tokio::test]
    async fn test_empty_feed_yields_no_items() {
        let fetcher = PagedFetch {
            page_sizes: vec![],
            requested_urls: RefCell::new(Vec::new()),
        };

        let items = fetch_all_pages(&fetcher, "https://www.rvo.nl/api/v1/search")
            .await
            .unwrap();
        assert!(items.is_empty());
        assert_eq!(fetcher.requested_urls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_aborts_the_source() {
        struct FailingFetch;
        impl FetchJson for FailingFetch {
            async fn fetch(&self, _url: &str) -> Result<Value, Box<dyn Error>> {
                Err("boom".into())
            }
        }

        let res = fetch_all_pages(&FailingFetch, "https://www.rvo.nl/api/v1/search").await;
        assert!(res.is_err());
    }

    #[test]
    fn test_page_url_respects_existing_query() {
        assert_eq!(
            page_url("https://www.rvo.nl/api/v1/search?rows=100", 2),
            "https://www.rvo.nl/api/v1/search?rows=100&page=2"
        );
        assert_eq!(
            page_url("https://www.rvo.nl/api/v1/search", 1),
            "https://www.rvo.nl/api/v1/search?page=1"
        );
    }
}
