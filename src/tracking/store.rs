//! The store of the known bulletins.

use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::errors::TrackerError;
use crate::models::BulletinRecord;
use crate::persistence::{load_json, save_json};

/// All the bulletins known, in the order they have been discovered.
pub struct BulletinStore {
    /// The file where the bulletins are persisted
    path: PathBuf,
    /// The bulletins
    records: Vec<BulletinRecord>,
}

impl BulletinStore {
    /// Loads the store, or creates an empty one if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        trace!("Running BulletinStore::load()");
        let records: Vec<BulletinRecord> = load_json(path)?.unwrap_or_default();
        debug!("{} bulletins in the store", records.len());
        Ok(BulletinStore {
            path: path.to_path_buf(),
            records,
        })
    }

    /// The bulletins of the store.
    pub fn records(&self) -> &[BulletinRecord] {
        &self.records
    }

    /// Adds bulletins at the end of the store.
    /// The caller guarantees their URLs are not in the store yet.
    pub fn extend(&mut self, records: &[BulletinRecord]) {
        self.records.extend_from_slice(records);
    }

    /// The bulletin with the most recent security patch.
    /// On a tie, the first one stored wins.
    pub fn latest(&self) -> Option<&BulletinRecord> {
        self.records.iter().rev().max_by_key(|r| r.security_patch)
    }

    /// Rewrites the store file.
    pub fn save(&self) -> Result<(), TrackerError> {
        trace!("Running BulletinStore::save()");
        save_json(&self.path, &self.records)
    }
}
