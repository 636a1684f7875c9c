//! Upstream content sources for the RVO sync.
//!
//! This module holds the source registry and the per-shape fetch helpers.
//! Every source is fetched the same two-phase way:
//!
//! 1. **Fetching**: pull raw JSON items from the endpoint (single-shot or paginated)
//! 2. **Normalizing**: map the raw items onto canonical records (see [`crate::normalize`])
//!
//! # Registered Sources
//!
//! | Source | Endpoint | Shape | Notes |
//! |--------|----------|-------|-------|
//! | RVO Blogs | `/api/v1/opendata/blogs` | single | |
//! | Evenementen | `/api/v1/opendata/events` | single | |
//! | Nieuws | `/api/v1/opendata/articles` | single | |
//! | Onderwerpen | `/api/v1/opendata/subjects` | single | |
//! | Overzichten | `/api/v1/opendata/summary` | single | |
//! | Praktijkverhalen | `/api/v1/opendata/showcases` | single | |
//! | Subsidies en financiering | `/api/v1/opendata/subsidies` | single | |
//! | RVO-Blogs | `/api/v1/search?fq=type:blog&rows=100` | paged | full-text scraping applies here |
//!
//! The Open Data blogs endpoint and the blog search feed overlap; the
//! `(url, content)` dedup set makes that harmless.

pub mod article;
pub mod blogs;
pub mod opendata;

use crate::normalize::{FieldMap, RVO_FIELDS};
use once_cell::sync::Lazy;

/// Site root all relative item URLs resolve against.
pub const BASE_URL: &str = "https://www.rvo.nl";

/// How a source's endpoint answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchShape {
    /// One response carrying the whole item list.
    Single,
    /// `page=1,2,...` until a page comes back empty.
    Paged,
}

/// One named upstream content category.
#[derive(Debug)]
pub struct Source {
    /// Name recorded in every record this source produces.
    pub name: &'static str,
    /// Full endpoint URL.
    pub endpoint: String,
    pub shape: FetchShape,
    /// Field names this source's items use.
    pub fields: &'static FieldMap,
    /// Whether article pages may be scraped for full text (opt-in via CLI).
    pub scrape_full_content: bool,
}

/// All registered sources, fetched in order.
pub static SOURCES: Lazy<Vec<Source>> = Lazy::new(|| {
    let mut sources: Vec<Source> = [
        ("RVO Blogs", "blogs"),
        ("Evenementen", "events"),
        ("Nieuws", "articles"),
        ("Onderwerpen", "subjects"),
        ("Overzichten", "summary"),
        ("Praktijkverhalen", "showcases"),
        ("Subsidies en financiering", "subsidies"),
    ]
    .into_iter()
    .map(|(name, slug)| Source {
        name,
        endpoint: format!("{BASE_URL}/api/v1/opendata/{slug}"),
        shape: FetchShape::Single,
        fields: &RVO_FIELDS,
        scrape_full_content: false,
    })
    .collect();

    sources.push(Source {
        name: "RVO-Blogs",
        endpoint: format!(
            "{BASE_URL}/api/v1/search?fq={}&rows=100",
            urlencoding::encode("type:blog")
        ),
        shape: FetchShape::Paged,
        fields: &RVO_FIELDS,
        scrape_full_content: true,
    });

    sources
});
