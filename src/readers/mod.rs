//! This module declares the readers.
//! A reader is used to fetch the documents over the network, so the rest
//! of the application only deals with their text.

pub mod http;

use std::time::Duration;

use crate::errors::TrackerError;

/// A common interface between all readers.
pub trait DocumentFetcher {
    /// Reads the document at `url` and returns its text.
    /// The request is abandoned after `timeout`.
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String, TrackerError>;
}
