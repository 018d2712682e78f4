use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::types::PostMetadata;

/// Maximum number of retained entries.
pub const HISTORY_CAP: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    pub thumb: String,
    pub author: String,
    pub ts: u64,
}

/// Bounded most-recent-first log of successful retrievals, deduplicated by
/// source URL. Persisting is the caller's choice; the retrieval pipeline
/// never touches it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a log from disk. A missing or unreadable file yields an empty
    /// log rather than an error.
    pub fn load(path: &Path) -> Self {
        let Ok(raw) = fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let raw = serde_json::to_string(self)?;
        fs::write(path, raw)
    }

    /// Record a successful retrieval at the front of the log, dropping any
    /// earlier entry for the same URL and trimming to the cap.
    pub fn add(&mut self, url: &str, meta: &PostMetadata) {
        self.entries.retain(|e| e.url != url);
        self.entries.insert(
            0,
            HistoryEntry {
                url: url.to_string(),
                title: meta.title.clone(),
                thumb: meta.thumbnail_url.clone(),
                author: meta.author.clone(),
                ts: unix_millis(),
            },
        );
        self.entries.truncate(HISTORY_CAP);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
