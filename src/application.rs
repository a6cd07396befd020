//! This module contains the main structure and logic for the whole
//! application.
//!
//! One run of the [`Application`] is one incremental cycle: the index is
//! fetched, the new bulletins are merged into the store, and every known
//! bulletin whose CVEs are not cached yet is fetched. A failing bulletin
//! is simply retried on the next run.
//!
//! The newest-only mode only prints the newest bulletin: it writes no
//! cache file and leaves the state of the incremental cycle untouched.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::{debug, error, info, trace, LevelFilter};

use crate::config::{Config, DEFAULT_INDEX_URL, DEFAULT_LOCALE, DEFAULT_USER_AGENT};
use crate::errors::TrackerError;
use crate::models::{BulletinRecord, BulletinState, CycleReport, PatchCveBundle};
use crate::parsers::document::Document;
use crate::parsers::index::BulletinIndexParser;
use crate::persistence::save_text;
use crate::readers::DocumentFetcher;
use crate::tracking::Tracker;
use crate::vulnerabilities::cache_managers::files::FileCacheManager;
use crate::vulnerabilities::fetchers::bulletin::BulletinFetcher;
use crate::vulnerabilities::fetchers::CacheOutcome;
use crate::writers::{Writer, Writers};

/// Represents the application
pub struct Application {
    /// The configuration, never modified
    config: Config,
    /// The reader used for every request
    reader: Box<dyn DocumentFetcher>,
    /// The parser of the index page
    index_parser: BulletinIndexParser,
    /// The fetcher of the CVEs, with its cache
    fetcher: BulletinFetcher,
}

impl Application {
    /// Creates a new application
    pub fn new(config: Config, reader: Box<dyn DocumentFetcher>) -> Result<Self, TrackerError> {
        trace!("In Application::new()");
        let index_parser = BulletinIndexParser::new(&config.index_url, &config.locale)?;
        let fetcher = BulletinFetcher::new(
            Box::new(FileCacheManager::new(&config.cve_details_dir)),
            config.detail_timeout,
        );
        Ok(Application {
            config,
            reader,
            index_parser,
            fetcher,
        })
    }

    /// The configuration of the application.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the application and gives the results to the writer.
    pub fn run(&self, writer: &dyn Writer, newest_only: bool) -> Result<(), TrackerError> {
        trace!("Running Application::run()");
        if newest_only {
            let bundle = self.fetch_newest()?;
            writer.write_newest(bundle.as_ref());
        } else {
            let report = self.run_cycle()?;
            writer.write_cycle(&report);
        }
        Ok(())
    }

    /// Fetches the index and lists its bulletins.
    fn discover(&self) -> Result<Vec<BulletinRecord>, TrackerError> {
        trace!("Running Application::discover()");
        info!("Fetching the bulletins index {}", self.config.index_url);
        let text = self
            .reader
            .fetch(&self.config.index_url, self.config.index_timeout)?;
        self.index_parser.parse(&Document::parse(&text))
    }

    /// Runs one incremental cycle.
    ///
    /// Only the failures to read the persisted state are returned as
    /// errors. Network failures and write failures are logged, and the
    /// cycle goes on with what it has.
    pub fn run_cycle(&self) -> Result<CycleReport, TrackerError> {
        trace!("Running Application::run_cycle()");
        let mut tracker = Tracker::load(&self.config)?;
        let mut report = CycleReport::default();

        let candidates = match self.discover() {
            Ok(c) => {
                report.index_reachable = true;
                c
            }
            Err(e) => {
                error!("Unable to get the bulletins index: {}", e);
                Vec::new()
            }
        };

        let new_bulletins = tracker.merge(candidates);
        if let Err(e) = tracker.save() {
            error!("Unable to save the known bulletins: {}", e);
        }

        for bulletin in &new_bulletins {
            self.cache_bulletin(bulletin, &mut report);
        }

        info!("Checking for missing CVE details");
        for bulletin in tracker.store().records() {
            if self.fetcher.cache().state(bulletin.security_patch) == BulletinState::Discovered {
                info!("Missing CVE details for {}", bulletin.security_patch);
                self.cache_bulletin(bulletin, &mut report);
            }
        }

        let latest = tracker.store().latest().cloned();
        if let Some(latest) = &latest {
            self.write_latest(latest);
            // The most recent bulletin gets one more attempt
            self.cache_bulletin(latest, &mut report);
        }

        report.pending = tracker
            .store()
            .records()
            .iter()
            .filter(|b| self.fetcher.cache().state(b.security_patch) == BulletinState::Discovered)
            .map(|b| b.security_patch)
            .collect();
        report.known_bulletins = tracker.store().records().len();
        report.new_bulletins = new_bulletins;
        report.latest = latest;
        Ok(report)
    }

    /// Fetches the newest bulletin listed in the index and its CVEs.
    /// Nothing is read from nor written to the persisted state.
    pub fn fetch_newest(&self) -> Result<Option<PatchCveBundle>, TrackerError> {
        trace!("Running Application::fetch_newest()");
        // The index lists the newest bulletin first
        match self.discover()?.into_iter().next() {
            Some(newest) => self
                .fetcher
                .fetch_bundle(self.reader.as_ref(), &newest)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Moves a bulletin to the `Cached` state, if it's not already.
    fn cache_bulletin(&self, bulletin: &BulletinRecord, report: &mut CycleReport) {
        let outcome = self.fetcher.ensure_cached(self.reader.as_ref(), bulletin);
        debug!("{}: {:?}", bulletin.security_patch, outcome);
        if let CacheOutcome::Cached { .. } = outcome {
            report.cached.push(bulletin.security_patch);
        }
    }

    /// Writes the latest security patch file.
    /// Example: 2024-03-01 | https://source.android.com/docs/security/bulletin/2024-03-01?hl=zh-cn
    fn write_latest(&self, latest: &BulletinRecord) {
        let content = format!("{} | {}", latest.security_patch, latest.url);
        match save_text(&self.config.latest_patch_file, &content) {
            Ok(()) => info!("Latest security patch: {}", content),
            Err(e) => error!("Unable to save the latest security patch: {}", e),
        }
    }
}

/// Represents the CLI arguments accepted by the tracker.
/// All of them are optional, running without argument performs one cycle.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The URL of the bulletins index
    #[arg(long, value_name = "URL", default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,
    /// The language of the bulletins to track
    #[arg(long, value_name = "LOCALE", default_value = DEFAULT_LOCALE)]
    pub locale: String,
    /// The directory where the state and the CVE details are stored
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,
    /// The timeout of the index request, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 10)]
    pub index_timeout: u64,
    /// The timeout of each bulletin request, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 15)]
    pub detail_timeout: u64,
    /// The User-Agent of the HTTP requests
    #[arg(long, value_name = "USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
    /// The writer to use
    #[arg(short, long, value_name = "WRITER", default_value = "textstdout")]
    pub writer: Writers,
    /// Only fetch the newest bulletin, without reading nor updating the
    /// local state
    #[arg(long)]
    pub newest_only: bool,
    /// The log level
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

impl Args {
    /// Builds the configuration described by the arguments.
    pub fn to_config(&self) -> Config {
        Config::new(&self.index_url, &self.locale, &self.data_dir)
            .with_timeouts(
                Duration::from_secs(self.index_timeout),
                Duration::from_secs(self.detail_timeout),
            )
            .with_user_agent(&self.user_agent)
    }
}
