//! Command-line interface definitions for RVO Text Sync.
//!
//! This module defines the CLI arguments and options using the `clap` crate,
//! plus the read-only [`SyncConfig`] the parsed arguments are converted into
//! once at startup. Upload settings can be provided via command-line flags or
//! environment variables.

use crate::api::RetryPolicy;
use clap::Parser;
use std::path::PathBuf;

/// Fallback dataset repository, also used when `HF_DATASET_REPO` is set but
/// empty.
pub const DEFAULT_DATASET_REPO: &str = "vGassen/Dutch-RVO-blogs";

const DEFAULT_DATASET_VERSION: &str = "1.0.0";

/// Command-line arguments for the RVO Text Sync application.
///
/// # Examples
///
/// ```sh
/// # Default run: fetch, dedup, append; upload when HF_TOKEN is set
/// rvo_text_sync
///
/// # Custom data dir, full-content scraping for the blog feed
/// rvo_text_sync -d ./data --fetch-full-content
///
/// # Fail fast when no credential is configured
/// rvo_text_sync --require-upload
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory the dataset file lives in
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    /// Name of the dataset file inside the data directory
    #[arg(short, long, default_value = "rvo_content.jsonl")]
    pub output_file: String,

    /// Hugging Face access token; without it the upload is skipped
    #[arg(long, env = "HF_TOKEN")]
    pub hf_token: Option<String>,

    /// Target dataset repository id
    #[arg(long, env = "HF_DATASET_REPO", default_value = DEFAULT_DATASET_REPO)]
    pub dataset_repo: String,

    /// Version string recorded in the dataset card
    #[arg(long, env = "DATASET_VERSION", default_value = DEFAULT_DATASET_VERSION)]
    pub dataset_version: String,

    /// Treat a missing token as a startup error instead of skipping the upload
    #[arg(long)]
    pub require_upload: bool,

    /// Scrape article pages for full text when a blog feed item carries none
    #[arg(long)]
    pub fetch_full_content: bool,
}

/// Read-only per-run configuration, built once from the parsed CLI and passed
/// into each pipeline stage.
#[derive(Debug)]
pub struct SyncConfig {
    pub data_dir: String,
    /// Full path of the dataset file.
    pub output_path: PathBuf,
    pub hf_token: Option<String>,
    pub dataset_repo: String,
    pub dataset_version: String,
    pub require_upload: bool,
    pub fetch_full_content: bool,
    pub retry: RetryPolicy,
}

impl Cli {
    /// Convert the parsed arguments into the per-run configuration.
    ///
    /// Empty environment values count as unset: an empty `HF_TOKEN` skips the
    /// upload and an empty `HF_DATASET_REPO` falls back to the default repo.
    pub fn into_config(self) -> SyncConfig {
        let output_path = PathBuf::from(&self.data_dir).join(&self.output_file);
        let hf_token = self.hf_token.filter(|token| !token.is_empty());
        let dataset_repo = if self.dataset_repo.is_empty() {
            DEFAULT_DATASET_REPO.to_string()
        } else {
            self.dataset_repo
        };
        let dataset_version = if self.dataset_version.is_empty() {
            DEFAULT_DATASET_VERSION.to_string()
        } else {
            self.dataset_version
        };

        SyncConfig {
            data_dir: self.data_dir,
            output_path,
            hf_token,
            dataset_repo,
            dataset_version,
            require_upload: self.require_upload,
            fetch_full_content: self.fetch_full_content,
            retry: RetryPolicy::default(),
        }
    }
}
