//! The ledger of the URLs already processed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;
use crate::models::now;
use crate::persistence::{load_json, save_json};

/// The content of the ledger file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    /// When the ledger has been written for the last time.
    #[serde(default)]
    last_update: Option<NaiveDateTime>,
    /// The URLs already processed.
    #[serde(default)]
    urls: Vec<String>,
}

/// The set of bulletin URLs already processed.
/// URLs are only ever added, never removed.
pub struct SeenUrlLedger {
    /// The file where the ledger is persisted
    path: PathBuf,
    /// The persisted content
    content: LedgerFile,
    /// The same URLs, for the lookups
    seen: HashSet<String>,
}

impl SeenUrlLedger {
    /// Loads the ledger, or creates an empty one if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        trace!("Running SeenUrlLedger::load()");
        let content: LedgerFile = load_json(path)?.unwrap_or_default();
        let seen = content.urls.iter().cloned().collect();
        debug!("{} URLs in the ledger", content.urls.len());
        Ok(SeenUrlLedger {
            path: path.to_path_buf(),
            content,
            seen,
        })
    }

    /// Whether the URL has already been processed.
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Marks the URL as processed.
    /// Returns false if it already was.
    pub fn insert(&mut self, url: &str) -> bool {
        if !self.seen.insert(url.to_string()) {
            return false;
        }
        self.content.urls.push(url.to_string());
        true
    }

    /// The number of URLs processed.
    pub fn len(&self) -> usize {
        self.content.urls.len()
    }

    /// Whether no URL has been processed yet.
    pub fn is_empty(&self) -> bool {
        self.content.urls.is_empty()
    }

    /// When the ledger has been persisted for the last time.
    pub fn last_update(&self) -> Option<NaiveDateTime> {
        self.content.last_update
    }

    /// Rewrites the ledger file.
    pub fn save(&mut self) -> Result<(), TrackerError> {
        trace!("Running SeenUrlLedger::save()");
        self.content.last_update = Some(now());
        save_json(&self.path, &self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_when_file_is_missing() {
        let temp_dir = TempDir::new().unwrap();
        let ledger = SeenUrlLedger::load(&temp_dir.path().join("processed_urls.json")).unwrap();
        assert!(ledger.is_empty());
        assert!(ledger.last_update().is_none());
    }

    #[test]
    fn urls_are_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("processed_urls.json");
        let mut ledger = SeenUrlLedger::load(&path).unwrap();
        assert!(ledger.insert("https://example.com/2024-01-01?hl=zh-cn"));
        assert!(!ledger.insert("https://example.com/2024-01-01?hl=zh-cn"));
        ledger.save().unwrap();

        let ledger = SeenUrlLedger::load(&path).unwrap();
        assert_eq!(1, ledger.len());
        assert!(ledger.contains("https://example.com/2024-01-01?hl=zh-cn"));
        assert!(ledger.last_update().is_some());
    }

    #[test]
    fn reads_file_without_last_update() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("processed_urls.json");
        std::fs::write(&path, r#"{"urls": ["https://example.com/a"]}"#).unwrap();

        let ledger = SeenUrlLedger::load(&path).unwrap();
        assert!(ledger.contains("https://example.com/a"));
        assert!(ledger.last_update().is_none());
    }
}
