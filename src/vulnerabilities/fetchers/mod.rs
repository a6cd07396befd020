/// The module fetchers defines the vulnerabilities fetchers.
pub mod bulletin;

/// What happened when the CVEs of a bulletin were asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The CVEs were already in cache, nothing has been fetched.
    AlreadyCached,
    /// The bulletin has been fetched and its CVEs stored in cache.
    Cached {
        /// The number of CVE rows in the bulletin.
        cve_count: usize,
    },
    /// The bulletin couldn't be fetched or stored. It will be retried on
    /// the next run.
    Failed,
}
