//! Tracking the bulletins across runs.
//!
//! The [`SeenUrlLedger`] is the only set of URLs consulted to decide
//! whether a bulletin is new. When loaded, it absorbs the URLs of the
//! [`BulletinStore`], so the store only ever grows by the URLs the ledger
//! grows by and both can't diverge.

pub mod ledger;
pub mod store;

use log::{debug, info, trace};

use crate::config::Config;
use crate::errors::TrackerError;
use crate::models::BulletinRecord;
use ledger::SeenUrlLedger;
use store::BulletinStore;

/// The persisted state of the tracker: known bulletins and processed URLs.
pub struct Tracker {
    /// The URLs already processed
    ledger: SeenUrlLedger,
    /// The bulletins known
    store: BulletinStore,
    /// Whether the state changed since it was loaded
    dirty: bool,
}

impl Tracker {
    /// Loads the state from the files of the configuration.
    pub fn load(config: &Config) -> Result<Self, TrackerError> {
        trace!("Running Tracker::load()");
        let mut ledger = SeenUrlLedger::load(&config.processed_file)?;
        let store = BulletinStore::load(&config.patch_data_file)?;

        let mut dirty = false;
        for record in store.records() {
            if ledger.insert(&record.url) {
                debug!("{} was in the store but not in the ledger", record.url);
                dirty = true;
            }
        }

        Ok(Tracker {
            ledger,
            store,
            dirty,
        })
    }

    /// The bulletins known.
    pub fn store(&self) -> &BulletinStore {
        &self.store
    }

    /// The URLs already processed.
    pub fn ledger(&self) -> &SeenUrlLedger {
        &self.ledger
    }

    /// Merges the bulletins found in the index.
    /// Returns the bulletins which were not known yet, in the order given.
    pub fn merge(&mut self, candidates: Vec<BulletinRecord>) -> Vec<BulletinRecord> {
        trace!("Running Tracker::merge()");
        let new_bulletins: Vec<BulletinRecord> = candidates
            .into_iter()
            .filter(|candidate| self.ledger.insert(&candidate.url))
            .collect();

        if !new_bulletins.is_empty() {
            info!("{} new bulletins discovered", new_bulletins.len());
            self.store.extend(&new_bulletins);
            self.dirty = true;
        }
        new_bulletins
    }

    /// Rewrites the store and the ledger, if they changed.
    pub fn save(&mut self) -> Result<(), TrackerError> {
        if !self.dirty {
            debug!("Nothing changed, the store and the ledger are kept as is");
            return Ok(());
        }
        self.store.save()?;
        self.ledger.save()?;
        self.dirty = false;
        Ok(())
    }
}
