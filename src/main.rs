//! # RVO Text Sync
//!
//! A pipeline that syncs text content from the RVO (Rijksdienst voor
//! Ondernemend Nederland) Open Data API into a Hugging Face dataset.
//!
//! ## Features
//!
//! - Fetches seven Open Data endpoints plus the paginated blog search feed
//! - Optionally scrapes blog article pages for full text
//! - Normalizes heterogeneous API fields into flat JSONL records
//! - Deduplicates against previously synced records by `(url, content)`
//! - Uploads the dataset file and its card to the Hugging Face Hub
//!
//! ## Usage
//!
//! ```sh
//! HF_TOKEN=hf_... rvo_text_sync -d ./data
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: per-source fetch with bounded exponential backoff
//! 2. **Normalizing**: field mapping, tag stripping, URL resolution
//! 3. **Appending**: dedup against the existing file, append-only writes
//! 4. **Publishing**: single-commit upload of the data file and dataset card
//!
//! A source that fails to fetch is logged and skipped; the run continues with
//! the remaining sources. Only a failed upload (or a missing credential under
//! `--require-upload`) fails the process.

use clap::Parser;
use itertools::Itertools;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod api;
mod cli;
mod models;
mod normalize;
mod outputs;
mod publish;
mod sources;
mod utils;

use api::{HttpJson, RetryFetch};
use cli::Cli;
use models::{ContentRecord, ContentType, DatasetCard};
use normalize::normalize_item;
use sources::{BASE_URL, FetchShape, SOURCES};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("rvo_text_sync starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(data_dir = %args.data_dir, repo = %args.dataset_repo, "Parsed CLI arguments");
    let config = args.into_config();

    // A run that must upload fails before any network work when the
    // credential is missing.
    if config.require_upload && config.hf_token.is_none() {
        error!("--require-upload was given but HF_TOKEN is not set");
        return Err("missing Hugging Face token".into());
    }

    // Early check: ensure the data directory is writable
    if let Err(e) = ensure_writable_dir(&config.data_dir).await {
        error!(
            path = %config.data_dir,
            error = %e,
            "Data directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;
    let base = Url::parse(BASE_URL)?;
    let fetcher = RetryFetch::new(HttpJson { client: &client }, config.retry.clone());

    // ---- Fetch and normalize, source by source ----
    let mut new_records: Vec<ContentRecord> = Vec::new();
    for source in SOURCES.iter() {
        info!(source = %source.name, endpoint = %source.endpoint, "Fetching source");

        let items = match source.shape {
            FetchShape::Single => sources::opendata::fetch_items(&fetcher, &source.endpoint).await,
            FetchShape::Paged => sources::blogs::fetch_all_pages(&fetcher, &source.endpoint).await,
        };
        let items = match items {
            Ok(items) => items,
            Err(e) => {
                error!(source = %source.name, error = %e, "Failed to fetch source; skipping");
                continue;
            }
        };
        info!(source = %source.name, count = items.len(), "Fetched raw items");

        for item in &items {
            let mut records = normalize_item(item, source.name, source.fields, &base);

            // Feed items rarely carry a body; scrape the page when asked to.
            if config.fetch_full_content
                && source.scrape_full_content
                && !records
                    .iter()
                    .any(|r| r.content_type == ContentType::FullContent)
            {
                if let Some(url) = records.first().map(|r| r.url.clone()) {
                    match sources::article::fetch_full_text(&client, &url).await {
                        Ok(Some(content)) => records.push(ContentRecord {
                            url: url.clone(),
                            content,
                            source: source.name.to_string(),
                            content_type: ContentType::FullContent,
                        }),
                        Ok(None) => {
                            warn!(%url, "Article page had no extractable text");
                        }
                        Err(e) => {
                            warn!(%url, error = %e, "Full-text fetch failed; keeping metadata records");
                        }
                    }
                }
            }

            new_records.extend(records);
        }
    }
    info!(count = new_records.len(), "Total candidate records");

    // ---- Dedup and append ----
    let mut seen = outputs::jsonl::load_existing_keys(&config.output_path).await?;
    let appended =
        outputs::jsonl::append_records(&config.output_path, &new_records, &mut seen).await?;
    info!(
        appended,
        duplicates = new_records.len() - appended,
        total = seen.len(),
        "Dataset file updated"
    );

    // ---- Publish ----
    let card = DatasetCard {
        language: vec!["nl".to_string()],
        license: "cc-by-4.0".to_string(),
        version: config.dataset_version.clone(),
        sources: SOURCES.iter().map(|s| s.name.to_string()).unique().collect(),
    };
    let card_markdown = outputs::card::render_card(&card)?;

    match &config.hf_token {
        None => {
            warn!("HF_TOKEN not set; skipping upload");
        }
        Some(token) => {
            if let Err(e) = publish::push_dataset(
                &client,
                token,
                &config.dataset_repo,
                &config.output_path,
                &card_markdown,
            )
            .await
            {
                error!(error = %e, "Upload failed");
                return Err(e);
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        appended,
        "Execution complete"
    );

    Ok(())
}
