//! Errors
//!
//! Every fallible operation of the crate returns a [`TrackerError`]. Most
//! of them are not fatal: the [`crate::application::Application`] decides
//! which ones only skip a step of the cycle.

use std::path::PathBuf;

use thiserror::Error;

/// The errors the tracker can encounter.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A network failure, a timeout or a non-success HTTP status.
    #[error("unable to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The document doesn't have the expected structure.
    #[error("unable to parse the document: {0}")]
    Parse(String),

    /// A local file or directory could not be read or written.
    #[error("unable to access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A local file exists but doesn't contain the expected JSON.
    #[error("invalid content in {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration can't be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TrackerError {
    /// Creates a [`TrackerError::Fetch`] for the given URL.
    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        TrackerError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a [`TrackerError::Persistence`] for the given path.
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TrackerError::Persistence {
            path: path.into(),
            source,
        }
    }
}
