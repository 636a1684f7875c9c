//! Field mapping and text normalization.
//!
//! Raw API items arrive with heterogeneous field names (`url` vs `link`,
//! `intro` vs `summary`, `body` vs `content`). This module maps them onto the
//! canonical [`ContentRecord`] shape through an explicit per-source
//! [`FieldMap`], cleaning text and resolving URLs along the way.
//!
//! One raw item produces zero to three records: one per non-empty field among
//! title, summary, and body.

use crate::models::{ContentRecord, ContentType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Mapping from source-specific field names to canonical fields.
///
/// For each canonical field the candidate keys are tried in order; the first
/// key holding a non-empty string wins. A missing or empty field is an
/// explicit `None`, never an empty string.
#[derive(Debug)]
pub struct FieldMap {
    pub url: &'static [&'static str],
    pub title: &'static [&'static str],
    pub summary: &'static [&'static str],
    pub body: &'static [&'static str],
}

/// The field names the RVO Open Data endpoints use.
pub const RVO_FIELDS: FieldMap = FieldMap {
    url: &["url", "link"],
    title: &["title"],
    summary: &["intro", "summary"],
    body: &["body", "content"],
};

impl FieldMap {
    pub fn url_of<'v>(&self, item: &'v Value) -> Option<&'v str> {
        first_string(item, self.url)
    }

    pub fn title_of<'v>(&self, item: &'v Value) -> Option<&'v str> {
        first_string(item, self.title)
    }

    pub fn summary_of<'v>(&self, item: &'v Value) -> Option<&'v str> {
        first_string(item, self.summary)
    }

    pub fn body_of<'v>(&self, item: &'v Value) -> Option<&'v str> {
        first_string(item, self.body)
    }
}

/// First candidate key holding a non-empty string value.
fn first_string<'v>(item: &'v Value, keys: &[&str]) -> Option<&'v str> {
    keys.iter()
        .filter_map(|key| item.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Strip markup tags, collapse whitespace runs to single spaces, and trim.
///
/// Returns `None` when nothing is left after cleaning.
pub fn clean_text(raw: &str) -> Option<String> {
    let without_tags = TAG_RE.replace_all(raw, " ");
    let collapsed = WS_RE.replace_all(&without_tags, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Resolve a possibly-relative URL against the site base.
///
/// Already-absolute URLs pass through unchanged; relative paths are joined
/// against `base`. Returns `None` when the path cannot be joined.
pub fn resolve_url(base: &Url, raw: &str) -> Option<String> {
    if raw.starts_with("http") {
        return Some(raw.to_string());
    }
    match base.join(raw) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            warn!(%raw, error = %e, "Could not resolve relative URL");
            None
        }
    }
}

/// Convert one raw API item into canonical records.
///
/// Emits one record per non-empty field among title / summary / body. Items
/// without a resolvable URL are skipped with a warning, since the absolute
/// URL is half of the dedup key.
pub fn normalize_item(
    item: &Value,
    source: &str,
    fields: &FieldMap,
    base: &Url,
) -> Vec<ContentRecord> {
    let Some(raw_url) = fields.url_of(item) else {
        warn!(%source, "Item has no URL field; skipping");
        return Vec::new();
    };
    let Some(url) = resolve_url(base, raw_url) else {
        warn!(%source, %raw_url, "Item URL could not be resolved; skipping");
        return Vec::new();
    };

    let mut records = Vec::new();
    let parts = [
        (fields.title_of(item), ContentType::Title),
        (fields.summary_of(item), ContentType::Summary),
        (fields.body_of(item), ContentType::FullContent),
    ];
    for (raw, content_type) in parts {
        if let Some(content) = raw.and_then(clean_text) {
            records.push(ContentRecord {
                url: url.clone(),
                content,
                source: source.to_string(),
                content_type,
            });
        }
    }

    debug!(%source, %url, count = records.len(), "Normalized item");
    records
}
