//! This module declares the parsers.
//! A parser turns the text of a document fetched by a reader into the
//! entities of the tracker: bulletins from the index page, CVEs from the
//! bulletin pages.

pub mod cve_table;
pub mod document;
pub mod index;
