//! The vulnerabilities module contains what's needed to get the CVEs of
//! the bulletins.
//!
//! It is composed of two parts, fetchers and cache managers.
//! A fetcher is there to fetch a bulletin and extract its CVEs.
//! A cache manager stores the CVEs fetched by the fetcher, so a bulletin
//! is only ever fetched once.

pub mod cache_managers;
pub mod fetchers;
