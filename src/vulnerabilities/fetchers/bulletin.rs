//! This module implements a vulnerability fetcher which downloads the
//! bulletins and extracts their CVEs.

use std::time::Duration;

use log::{debug, error, info, trace};

use crate::errors::TrackerError;
use crate::models::{BulletinRecord, PatchCveBundle};
use crate::parsers::cve_table::CveTableExtractor;
use crate::parsers::document::Document;
use crate::readers::DocumentFetcher;
use crate::vulnerabilities::cache_managers::CacheManager;
use crate::vulnerabilities::fetchers::CacheOutcome;

/// This structs represents the bulletin vulnerabilities fetcher.
pub struct BulletinFetcher {
    /// The cache manager, a bulletin in cache is never fetched again.
    cache: Box<dyn CacheManager>,
    /// The extractor of the CVE tables
    extractor: CveTableExtractor,
    /// The timeout of each bulletin request
    timeout: Duration,
}

impl BulletinFetcher {
    /// Creates a new BulletinFetcher.
    pub fn new(cache: Box<dyn CacheManager>, timeout: Duration) -> Self {
        BulletinFetcher {
            cache,
            extractor: CveTableExtractor::new(),
            timeout,
        }
    }

    /// The cache manager of the fetcher.
    pub fn cache(&self) -> &dyn CacheManager {
        self.cache.as_ref()
    }

    /// Fetches a bulletin and extracts its CVEs, without using the cache.
    pub fn fetch_bundle(
        &self,
        reader: &dyn DocumentFetcher,
        bulletin: &BulletinRecord,
    ) -> Result<PatchCveBundle, TrackerError> {
        trace!("Running BulletinFetcher::fetch_bundle()");
        info!(
            "Fetching the CVE details of the security patch {}",
            bulletin.security_patch
        );
        let text = reader.fetch(&bulletin.url, self.timeout)?;
        let extraction = self.extractor.extract(&Document::parse(&text));
        Ok(PatchCveBundle::new(
            bulletin,
            extraction.cve_count,
            extraction.cve_details,
        ))
    }

    /// Makes sure the CVEs of the bulletin are in cache.
    /// The errors are logged and reported as [`CacheOutcome::Failed`], they
    /// never affect the other bulletins.
    pub fn ensure_cached(
        &self,
        reader: &dyn DocumentFetcher,
        bulletin: &BulletinRecord,
    ) -> CacheOutcome {
        trace!("Running BulletinFetcher::ensure_cached()");
        if self.cache.contains(bulletin.security_patch) {
            debug!(
                "CVE details of {} already in cache, skipped",
                bulletin.security_patch
            );
            return CacheOutcome::AlreadyCached;
        }

        let bundle = match self.fetch_bundle(reader, bulletin) {
            Ok(b) => b,
            Err(e) => {
                error!(
                    "Unable to get the CVE details of {}: {}",
                    bulletin.security_patch, e
                );
                return CacheOutcome::Failed;
            }
        };

        if let Err(e) = self.cache.store(&bundle) {
            error!(
                "Unable to store the CVE details of {}: {}",
                bulletin.security_patch, e
            );
            return CacheOutcome::Failed;
        }

        CacheOutcome::Cached {
            cve_count: bundle.cve_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vulnerabilities::cache_managers::files::FileCacheManager;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use tempfile::TempDir;

    /// Serves the same page for every URL, or fails.
    struct StaticFetcher {
        page: Option<&'static str>,
        calls: Cell<usize>,
    }

    impl DocumentFetcher for StaticFetcher {
        fn fetch(&self, url: &str, _timeout: Duration) -> Result<String, TrackerError> {
            self.calls.set(self.calls.get() + 1);
            self.page
                .map(str::to_string)
                .ok_or_else(|| TrackerError::fetch(url, "connection refused"))
        }
    }

    const PAGE: &str = r#"<table>
        <tr><th>CVE</th><th>Severity</th></tr>
        <tr><td>CVE-2024-0001</td><td>High</td></tr>
        <tr><td>CVE-2024-0002</td><td>Moderate</td></tr>
        <tr><td>CVE-2024-0003</td><td>Critical</td></tr>
    </table>"#;

    fn bulletin() -> BulletinRecord {
        BulletinRecord::new(
            "https://example.com/2024-03-01?hl=zh-cn",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn fetches_once_then_uses_cache() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = BulletinFetcher::new(
            Box::new(FileCacheManager::new(temp_dir.path())),
            Duration::from_secs(1),
        );
        let reader = StaticFetcher {
            page: Some(PAGE),
            calls: Cell::new(0),
        };

        assert_eq!(
            CacheOutcome::Cached { cve_count: 3 },
            fetcher.ensure_cached(&reader, &bulletin())
        );
        assert_eq!(
            CacheOutcome::AlreadyCached,
            fetcher.ensure_cached(&reader, &bulletin())
        );
        assert_eq!(1, reader.calls.get());

        let bundle = fetcher
            .cache()
            .read(bulletin().security_patch)
            .unwrap()
            .unwrap();
        assert_eq!("https://example.com/2024-03-01?hl=zh-cn", bundle.url);
        assert_eq!(3, bundle.cve_details.len());
    }

    #[test]
    fn failed_fetch_leaves_no_cache_entry() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = BulletinFetcher::new(
            Box::new(FileCacheManager::new(temp_dir.path())),
            Duration::from_secs(1),
        );
        let reader = StaticFetcher {
            page: None,
            calls: Cell::new(0),
        };

        assert_eq!(
            CacheOutcome::Failed,
            fetcher.ensure_cached(&reader, &bulletin())
        );
        assert!(!fetcher.cache().contains(bulletin().security_patch));
    }
}
