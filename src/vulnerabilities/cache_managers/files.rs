//! This module contains the FileCacheManager struct.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{info, trace, warn};

use crate::errors::TrackerError;
use crate::models::PatchCveBundle;
use crate::persistence::{load_json, save_json};
use crate::vulnerabilities::cache_managers::CacheManager;

/// Represents a cache manager which stores the data in files.
///
/// The cache has the following structure:
/// cve_details/
///   \__cve_<security_patch>.json
///
/// The existence of the file means the CVEs of the bulletin have been
/// extracted. It is never refreshed.
pub struct FileCacheManager {
    /// The directory of the cache files
    root_dir: PathBuf,
}

impl FileCacheManager {
    /// Creates a new FileCacheManager, storing its files in `root_dir`.
    /// The directory is created when the first entry is stored.
    pub fn new(root_dir: &Path) -> Self {
        FileCacheManager {
            root_dir: root_dir.to_path_buf(),
        }
    }

    /// The file of a security patch.
    pub fn filename(&self, security_patch: NaiveDate) -> PathBuf {
        self.root_dir
            .join(format!("cve_{}.json", security_patch.format("%Y-%m-%d")))
    }
}

impl CacheManager for FileCacheManager {
    fn contains(&self, security_patch: NaiveDate) -> bool {
        self.filename(security_patch).exists()
    }

    fn read(&self, security_patch: NaiveDate) -> Result<Option<PatchCveBundle>, TrackerError> {
        trace!("Running FileCacheManager::read()");
        load_json(&self.filename(security_patch))
    }

    fn store(&self, bundle: &PatchCveBundle) -> Result<(), TrackerError> {
        trace!("Running FileCacheManager::store()");
        let filename = self.filename(bundle.security_patch);
        if filename.exists() {
            warn!(
                "{} already exists, the cache entry is kept as is",
                filename.display()
            );
            return Ok(());
        }

        save_json(&filename, bundle)?;
        info!("CVE details saved to {}", filename.display());
        Ok(())
    }
}
