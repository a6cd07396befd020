//! In this module are declared the entities manipulated by this program

use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Returns the current local time, truncated to the second.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// (De)serializes the timestamps of the bulletins and bundles.
/// Example: 2024-03-04 12:30:00
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Represents a security bulletin listed on the index page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulletinRecord {
    /// The URL of the bulletin, in the tracked locale. It's the unique key.
    /// Example: https://source.android.com/docs/security/bulletin/2024-03-01?hl=zh-cn
    pub url: String,
    /// The security patch level of the bulletin.
    /// Serialized as YYYY-MM-DD, so the lexicographic order is also the
    /// chronological one.
    pub security_patch: NaiveDate,
    /// When the bulletin has been discovered for the first time.
    #[serde(with = "timestamp")]
    pub discovered: NaiveDateTime,
}

impl BulletinRecord {
    /// Creates a new bulletin, discovered now.
    pub fn new(url: &str, security_patch: NaiveDate) -> Self {
        BulletinRecord {
            url: url.to_string(),
            security_patch,
            discovered: now(),
        }
    }
}

/// Represents a CVE found in a table of a bulletin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CveRecord {
    /// The CVE identifier.
    /// Example: CVE-2024-0031
    pub cve_id: String,
    /// The other columns of the row, keyed by their header, in the order
    /// of the table.
    /// Example: {"参考编号": "A-309286883", "类型": "RCE", "严重程度": "严重"}
    pub details: Map<String, Value>,
}

impl CveRecord {
    /// Creates a new CVE without details
    pub fn new(cve_id: &str) -> Self {
        CveRecord {
            cve_id: cve_id.to_string(),
            details: Map::new(),
        }
    }
}

/// The CVEs of a bulletin, as stored in the cache.
/// One bundle exists per security patch and it is never rewritten.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatchCveBundle {
    /// The security patch level of the bulletin.
    pub security_patch: NaiveDate,
    /// The URL of the bulletin.
    pub url: String,
    /// The number of rows in the CVE tables of the bulletin.
    /// It can be greater than the length of `cve_details`.
    pub cve_count: usize,
    /// When the bulletin has been discovered.
    #[serde(with = "timestamp")]
    pub discovered: NaiveDateTime,
    /// When the bulletin has been fetched to extract the CVEs.
    #[serde(with = "timestamp")]
    pub fetched_at: NaiveDateTime,
    /// The CVEs found in the bulletin.
    pub cve_details: Vec<CveRecord>,
}

impl PatchCveBundle {
    /// Creates the bundle of a bulletin, fetched now.
    pub fn new(bulletin: &BulletinRecord, cve_count: usize, cve_details: Vec<CveRecord>) -> Self {
        PatchCveBundle {
            security_patch: bulletin.security_patch,
            url: bulletin.url.clone(),
            cve_count,
            discovered: bulletin.discovered,
            fetched_at: now(),
            cve_details,
        }
    }
}

/// The state of a bulletin in the tracker.
/// There is no way back from `Cached` to `Discovered`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletinState {
    /// Known in the store, but its CVEs are not cached yet.
    Discovered,
    /// The CVEs of the bulletin are in the cache.
    Cached,
}

/// What happened during one cycle of the tracker.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CycleReport {
    /// Whether the index could be fetched and parsed.
    pub index_reachable: bool,
    /// The bulletins discovered during this cycle.
    pub new_bulletins: Vec<BulletinRecord>,
    /// The number of bulletins in the store at the end of the cycle.
    pub known_bulletins: usize,
    /// The bulletins whose CVEs have been cached during this cycle.
    pub cached: Vec<NaiveDate>,
    /// The bulletins whose CVEs are still missing at the end of the cycle.
    pub pending: Vec<NaiveDate>,
    /// The most recent bulletin known.
    pub latest: Option<BulletinRecord>,
}
