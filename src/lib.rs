//! Tracks the Android Security Bulletins.
//!
//! Each run fetches the bulletins index, remembers the new bulletins and
//! caches the CVEs listed in every bulletin, so that the next runs only
//! fetch what changed.

pub mod application;
pub mod config;
pub mod errors;
pub mod models;
pub mod parsers;
pub mod persistence;
pub mod readers;
pub mod tracking;
pub mod vulnerabilities;
pub mod writers;
