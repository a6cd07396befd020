//! The configuration of the tracker.
//!
//! A [`Config`] is built once, from the command line, and handed to the
//! [`crate::application::Application`]. Nothing reads paths or URLs from
//! anywhere else.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// The overview page listing all the Android Security Bulletins.
pub const DEFAULT_INDEX_URL: &str =
    "https://source.android.com/docs/security/bulletin/asb-overview?hl=zh-cn";
/// The language of the bulletins to track.
pub const DEFAULT_LOCALE: &str = "zh-cn";
/// The User-Agent sent with every HTTP request.
pub const DEFAULT_USER_AGENT: &str = concat!("asb-tracker/", env!("CARGO_PKG_VERSION"));

/// The immutable configuration of the tracker.
#[derive(Clone, Debug)]
pub struct Config {
    /// The URL of the index page.
    pub index_url: String,
    /// The locale of the bulletins to track (the `hl` query parameter).
    pub locale: String,
    /// The JSON file holding the known bulletins.
    pub patch_data_file: PathBuf,
    /// The JSON file holding the URLs already processed.
    pub processed_file: PathBuf,
    /// The text file holding the latest security patch.
    pub latest_patch_file: PathBuf,
    /// The directory holding one JSON file per bulletin.
    pub cve_details_dir: PathBuf,
    /// The timeout of the index request.
    pub index_timeout: Duration,
    /// The timeout of each bulletin request.
    pub detail_timeout: Duration,
    /// The User-Agent of the HTTP requests.
    pub user_agent: String,
}

impl Config {
    /// Creates a configuration storing all its files in `data_dir`.
    pub fn new(index_url: &str, locale: &str, data_dir: &Path) -> Self {
        Config {
            index_url: index_url.to_string(),
            locale: locale.to_string(),
            patch_data_file: data_dir.join("android_patches.json"),
            processed_file: data_dir.join("processed_urls.json"),
            latest_patch_file: data_dir.join("latest_patch.txt"),
            cve_details_dir: data_dir.join("cve_details"),
            index_timeout: Duration::from_secs(10),
            detail_timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Sets the timeouts of the index and bulletin requests.
    pub fn with_timeouts(mut self, index_timeout: Duration, detail_timeout: Duration) -> Self {
        self.index_timeout = index_timeout;
        self.detail_timeout = detail_timeout;
        self
    }

    /// Sets the User-Agent of the HTTP requests.
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_INDEX_URL, DEFAULT_LOCALE, Path::new("."))
    }
}
