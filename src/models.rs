//! Data models for dataset records and the sidecar dataset card.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ContentRecord`]: One normalized line of the output dataset
//! - [`ContentType`]: Which field of the upstream item a record was built from
//! - [`SeenRecord`]: Minimal lenient view of a persisted line, used to rebuild
//!   the dedup set
//! - [`DatasetCard`]: Metadata uploaded alongside the dataset file

use serde::{Deserialize, Serialize};

/// Dedup key for a record: the `(url, content)` pair, compared by exact
/// string equality.
pub type RecordKey = (String, String);

/// Which upstream field a [`ContentRecord`] was derived from.
///
/// Serialized in snake_case, so `FullContent` becomes `"full_content"` on the
/// wire and in the dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Title,
    Summary,
    FullContent,
}

/// One normalized entry of the output dataset.
///
/// Records are written as one JSON object per line, appended to the dataset
/// file and never rewritten. The `url` is always absolute and `content` is
/// non-empty, markup-free, and whitespace-normalized by the time a record is
/// constructed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentRecord {
    /// Absolute URL of the page this content came from.
    pub url: String,
    /// The cleaned text content.
    pub content: String,
    /// Name of the upstream content category (e.g. "RVO Blogs").
    pub source: String,
    /// Which upstream field produced this record.
    pub content_type: ContentType,
}

impl ContentRecord {
    /// The `(url, content)` pair that decides whether this record already
    /// exists in the output file.
    pub fn key(&self) -> RecordKey {
        (self.url.clone(), self.content.clone())
    }
}

/// Lenient view of one persisted line, for rebuilding the dedup set.
///
/// Only `url` and `content` matter for identity; older files may carry
/// slightly different extra fields, which are ignored on load.
#[derive(Debug, Deserialize)]
pub struct SeenRecord {
    pub url: String,
    pub content: String,
}

impl SeenRecord {
    pub fn into_key(self) -> RecordKey {
        (self.url, self.content)
    }
}

/// Sidecar metadata describing the dataset, uploaded as the repo README.
///
/// Rendered as YAML front matter followed by a short Markdown body, the
/// format the dataset hub expects for dataset cards.
#[derive(Debug, Deserialize, Serialize)]
pub struct DatasetCard {
    /// ISO 639-1 language codes of the content.
    pub language: Vec<String>,
    /// SPDX-ish license identifier.
    pub license: String,
    /// Version string for this sync, from configuration.
    pub version: String,
    /// Names of the upstream sources that contributed records.
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ContentType::FullContent).unwrap(),
            "\"full_content\""
        );
        assert_eq!(
            serde_json::to_string(&ContentType::Title).unwrap(),
            "\"title\""
        );
        assert_eq!(
            serde_json::to_string(&ContentType::Summary).unwrap(),
            "\"summary\""
        );
    }

    #[test]
    fn test_content_record_round_trip() {
        let record = ContentRecord {
            url: "https://www.rvo.nl/onderwerpen/energie".to_string(),
            content: "Energie besparen voor ondernemers".to_string(),
            source: "Onderwerpen".to_string(),
            content_type: ContentType::Summary,
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: ContentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.url, record.url);
        assert_eq!(back.content, record.content);
        assert_eq!(back.content_type, ContentType::Summary);
    }

    #[test]
    fn test_record_key() {
        let record = ContentRecord {
            url: "https://www.rvo.nl/blog/1".to_string(),
            content: "text".to_string(),
            source: "RVO Blogs".to_string(),
            content_type: ContentType::Title,
        };

        assert_eq!(
            record.key(),
            ("https://www.rvo.nl/blog/1".to_string(), "text".to_string())
        );
    }

    #[test]
    fn test_seen_record_ignores_unknown_fields() {
        let json = r#"{
            "url": "https://www.rvo.nl/blog/1",
            "content": "text",
            "source": "RVO Blogs",
            "type": "title",
            "date": "2024-01-01"
        }"#;

        let seen: SeenRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            seen.into_key(),
            ("https://www.rvo.nl/blog/1".to_string(), "text".to_string())
        );
    }

    #[test]
    fn test_seen_record_requires_url_and_content() {
        let json = r#"{"url": "https://www.rvo.nl/blog/1"}"#;
        assert!(serde_json::from_str::<SeenRecord>(json).is_err());
    }
}
