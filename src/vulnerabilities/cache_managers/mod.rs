/// The module cache_managers defines the vulnerabilities cache managers.
pub mod files;

use chrono::NaiveDate;

use crate::errors::TrackerError;
use crate::models::{BulletinState, PatchCveBundle};

/// A common interface between all cache managers.
/// An entry, once stored, is never modified.
pub trait CacheManager {
    /// Whether the CVEs of the security patch are in cache.
    fn contains(&self, security_patch: NaiveDate) -> bool;

    /// Reads the CVEs of a security patch from the cache.
    fn read(&self, security_patch: NaiveDate) -> Result<Option<PatchCveBundle>, TrackerError>;

    /// Stores the CVEs of a security patch in cache.
    fn store(&self, bundle: &PatchCveBundle) -> Result<(), TrackerError>;

    /// The state of the bulletin of a security patch.
    fn state(&self, security_patch: NaiveDate) -> BulletinState {
        if self.contains(security_patch) {
            BulletinState::Cached
        } else {
            BulletinState::Discovered
        }
    }
}
