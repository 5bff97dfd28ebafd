//! Claim journal
//!
//! Appends one JSON line per claim attempt, successful or not.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Entry in the claim journal
#[derive(Debug, Serialize)]
struct ClaimEntry<'a> {
    id: String,
    timestamp: DateTime<Utc>,
    round: &'a str,
    sender: &'a str,
    contract: &'a str,
    status: &'static str,
    tx_hash: Option<&'a str>,
    error: Option<&'a str>,
}

pub struct ClaimJournal {
    path: Mutex<PathBuf>,
}

impl ClaimJournal {
    /// Journal appending to `path` (JSONL)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Mutex::new(path.into()),
        }
    }

    /// Record the outcome of one claim; write failures are logged, not returned
    pub async fn record(
        &self,
        round: &str,
        sender: &str,
        contract: &str,
        outcome: Result<&str, &str>,
    ) {
        let (status, tx_hash, error) = match outcome {
            Ok(hash) => ("success", Some(hash), None),
            Err(message) => ("error", None, Some(message)),
        };
        let entry = ClaimEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            round,
            sender,
            contract,
            status,
            tx_hash,
            error,
        };

        let path = self.path.lock().await;
        if let Err(e) = append(&path, &entry) {
            tracing::warn!(error = %e, path = %path.display(), "Failed to write claim journal entry");
        }
    }
}

fn append(path: &Path, entry: &ClaimEntry<'_>) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn appends_one_line_per_claim() {
        let temp_file = NamedTempFile::new().unwrap();
        let journal = ClaimJournal::new(temp_file.path());

        journal
            .record("10765", "juno1alice", "juno1contract", Ok("ABCDEF"))
            .await;
        journal
            .record("10764", "juno1alice", "juno1contract", Err("out of gas"))
            .await;

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let lines: Vec<Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["status"], "success");
        assert_eq!(lines[0]["tx_hash"], "ABCDEF");
        assert_eq!(lines[1]["status"], "error");
        assert_eq!(lines[1]["error"], "out of gas");
        assert!(lines[1]["tx_hash"].is_null());
        assert_ne!(lines[0]["id"], lines[1]["id"]);
        assert!(Uuid::parse_str(lines[0]["id"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn unwritable_path_does_not_fail_the_claim() {
        let dir = tempfile::tempdir().unwrap();
        let journal = ClaimJournal::new(dir.path());

        // A directory cannot be opened for append; the error is only logged
        journal
            .record("1", "juno1alice", "juno1contract", Ok("HASH"))
            .await;
    }
}
