//! Dataset publishing to the Hugging Face Hub.
//!
//! The dataset file and its card go up in a single commit against the
//! dataset repository, via the Hub's NDJSON commit endpoint:
//!
//! ```text
//! POST {hub}/api/datasets/{repo}/commit/main
//! authorization: Bearer <token>
//! content-type: application/x-ndjson
//!
//! {"key":"header","value":{"summary":"..."}}
//! {"key":"file","value":{"path":"rvo_content.jsonl","content":"<base64>","encoding":"base64"}}
//! {"key":"file","value":{"path":"README.md","content":"<base64>","encoding":"base64"}}
//! ```
//!
//! Whether to call this at all is the caller's decision: without a token the
//! upload is skipped and reported upstream; here an upload failure is fatal,
//! logged with a preview of the response body and then propagated.

use crate::utils::truncate_for_log;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Local;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument, warn};

/// Hub root; the commit endpoint hangs off the dataset repo id.
const HUB_ENDPOINT: &str = "https://huggingface.co";

#[derive(Debug, Serialize)]
struct CommitLine<'a, T: Serialize> {
    key: &'a str,
    value: T,
}

#[derive(Debug, Serialize)]
struct CommitHeader<'a> {
    summary: &'a str,
}

#[derive(Debug, Serialize)]
struct CommitFile<'a> {
    path: &'a str,
    content: String,
    encoding: &'a str,
}

/// Build the NDJSON commit payload: a header line, then one line per file.
fn commit_payload(summary: &str, files: &[(&str, &[u8])]) -> Result<String, Box<dyn Error>> {
    let mut lines = Vec::with_capacity(files.len() + 1);
    lines.push(serde_json::to_string(&CommitLine {
        key: "header",
        value: CommitHeader { summary },
    })?);
    for (path, bytes) in files {
        lines.push(serde_json::to_string(&CommitLine {
            key: "file",
            value: CommitFile {
                path,
                content: BASE64.encode(bytes),
                encoding: "base64",
            },
        })?);
    }
    Ok(lines.join("\n"))
}

fn commit_url(repo: &str) -> String {
    format!("{HUB_ENDPOINT}/api/datasets/{repo}/commit/main")
}

/// Upload the dataset file and card as one commit.
///
/// A dataset file that does not exist yet (nothing was ever synced) is
/// reported and skipped without error. An upload failure is logged and then
/// propagated as fatal.
#[instrument(level = "info", skip_all, fields(%repo))]
pub async fn push_dataset(
    client: &reqwest::Client,
    token: &str,
    repo: &str,
    dataset_path: &Path,
    card: &str,
) -> Result<(), Box<dyn Error>> {
    if !dataset_path.exists() {
        warn!(path = %dataset_path.display(), "Dataset file does not exist; nothing to upload");
        return Ok(());
    }

    let data = fs::read(dataset_path).await?;
    let file_name = dataset_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("rvo_content.jsonl");
    let summary = format!("Sync RVO content {}", Local::now().date_naive());
    let payload = commit_payload(
        &summary,
        &[(file_name, data.as_slice()), ("README.md", card.as_bytes())],
    )?;

    info!(bytes = data.len(), %file_name, "Uploading dataset commit");
    let response = client
        .post(commit_url(repo))
        .bearer_auth(token)
        .header("content-type", "application/x-ndjson")
        .body(payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(%status, body = %truncate_for_log(&body, 300), "Dataset upload failed");
        return Err(format!("dataset upload failed with status {status}").into());
    }

    info!(%status, "Dataset upload completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_commit_payload_shape() {
        let payload = commit_payload(
            "Sync RVO content 2024-06-01",
            &[
                ("rvo_content.jsonl", b"{\"url\":\"x\"}\n".as_slice()),
                ("README.md", b"# card".as_slice()),
            ],
        )
        .unwrap();

        let lines: Vec<&str> = payload.lines().collect();
        assert_eq!(lines.len(), 3);

        let header: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(header["key"], "header");
        assert_eq!(header["value"]["summary"], "Sync RVO content 2024-06-01");

        let file: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(file["key"], "file");
        assert_eq!(file["value"]["path"], "rvo_content.jsonl");
        assert_eq!(file["value"]["encoding"], "base64");
    }

    #[test]
    fn test_commit_payload_round_trips_content() {
        let payload = commit_payload("s", &[("data.jsonl", b"hello world".as_slice())]).unwrap();
        let file: Value = serde_json::from_str(payload.lines().nth(1).unwrap()).unwrap();
        let decoded = BASE64
            .decode(file["value"]["content"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, b"hello world");
    }

    #[test]
    fn test_commit_url() {
        assert_eq!(
            commit_url("vGassen/Dutch-RVO-blogs"),
            "https://huggingface.co/api/datasets/vGassen/Dutch-RVO-blogs/commit/main"
        );
    }
}
