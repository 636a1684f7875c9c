//! Append-only JSONL dataset storage with set-based deduplication.
//!
//! The dataset file grows monotonically: records are appended, never updated
//! in place, never deleted. Identity is the `(url, content)` pair; the set of
//! existing keys is rebuilt from the file at the start of each run, which
//! makes appending idempotent across repeated runs with identical upstream
//! data.

use crate::models::{ContentRecord, RecordKey, SeenRecord};
use std::collections::HashSet;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

/// Load the `(url, content)` keys already present in the dataset file.
///
/// A missing file is an empty set. Malformed lines are skipped with a warning
/// carrying the line number; they never fail the load.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_existing_keys(path: &Path) -> Result<HashSet<RecordKey>, Box<dyn Error>> {
    let mut seen = HashSet::new();
    if !path.exists() {
        info!("No existing dataset file; starting fresh");
        return Ok(seen);
    }

    let contents = fs::read_to_string(path).await?;
    for (line_idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<SeenRecord>(line) {
            Ok(record) => {
                seen.insert(record.into_key());
            }
            Err(e) => {
                warn!(line = line_idx + 1, error = %e, "Skipping malformed dataset line");
            }
        }
    }

    info!(keys = seen.len(), "Loaded existing dedup keys");
    Ok(seen)
}

/// Append every record whose key is absent from `seen`, updating the set as
/// it goes.
///
/// Returns the number of lines written. An empty batch writes nothing and
/// does not create the file.
#[instrument(level = "info", skip_all, fields(path = %path.display(), candidates = records.len()))]
pub async fn append_records(
    path: &Path,
    records: &[ContentRecord],
    seen: &mut HashSet<RecordKey>,
) -> Result<usize, Box<dyn Error>> {
    if records.is_empty() {
        info!("No candidate records; nothing to append");
        return Ok(0);
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;

    let mut appended = 0usize;
    for record in records {
        let key = record.key();
        if seen.contains(&key) {
            debug!(url = %record.url, "Skipping duplicate record");
            continue;
        }
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        seen.insert(key);
        appended += 1;
    }
    file.flush().await?;

    info!(
        appended,
        skipped = records.len() - appended,
        "Appended records"
    );
    Ok(appended)
}
