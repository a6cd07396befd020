//! Fetch documents over HTTP(S)
//!
//! The [`HttpReader`] sends blocking requests, one at a time. Only the
//! body of successful responses is returned.

use std::time::Duration;

use log::{debug, trace};
use reqwest::blocking::Client;

use super::DocumentFetcher;
use crate::errors::TrackerError;

/// A reader used to fetch HTTP(S) documents.
pub struct HttpReader {
    /// The HTTP client, reused between the requests
    client: Client,
    /// The User-Agent sent with the requests
    user_agent: String,
}

impl HttpReader {
    /// Creates a new HttpReader
    pub fn new(user_agent: &str) -> Result<Self, TrackerError> {
        trace!("Running HttpReader::new()");
        let client = Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| TrackerError::InvalidConfig(format!("unable to create a HTTP client: {}", e)))?;
        Ok(HttpReader {
            client,
            user_agent: user_agent.to_string(),
        })
    }
}

impl DocumentFetcher for HttpReader {
    /// Sends one HTTP request and get the response body.
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String, TrackerError> {
        trace!("Running HttpReader::fetch()");
        debug!("Sending HTTP request for URL {} (timeout {:?})", url, timeout);
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "text/html")
            .timeout(timeout)
            .send()
            .map_err(|e| {
                debug!("An error occured in the HTTP request to {}: {}", url, e);
                TrackerError::fetch(url, e)
            })?;

        if !response.status().is_success() {
            debug!("Invalid HTTP response code for {}: {}", url, response.status());
            return Err(TrackerError::fetch(
                url,
                format!("HTTP status {}", response.status()),
            ));
        }

        response.text().map_err(|e| TrackerError::fetch(url, e))
    }
}
