//! Writing the results
//!
//! After a cycle, it's up to a writer to present the [`CycleReport`] to
//! the user. It provides a common interface, allowing to work on the
//! results without affecting the execution of the application.

pub mod json;
pub mod textstdout;

use clap::{builder::PossibleValue, ValueEnum};

use crate::models::{CycleReport, PatchCveBundle};
use json::JsonWriter;
use textstdout::TextStdoutWriter;

/// A trait to have a common interface between writers.
pub trait Writer {
    /// Writes the report of an incremental cycle.
    fn write_cycle(&self, report: &CycleReport);

    /// Writes the CVEs of the newest bulletin, `None` if the index didn't
    /// list any bulletin.
    fn write_newest(&self, bundle: Option<&PatchCveBundle>);
}

/// The writers available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Writers {
    /// Human readable text on STDOUT
    TextStdout,
    /// JSON on STDOUT
    Json,
}

impl Writers {
    /// Creates the selected writer.
    pub fn create(&self) -> Box<dyn Writer> {
        match self {
            Writers::TextStdout => Box::new(TextStdoutWriter::new()),
            Writers::Json => Box::new(JsonWriter::new()),
        }
    }
}

impl ValueEnum for Writers {
    /// Lists the variants available for clap
    fn value_variants<'a>() -> &'a [Self] {
        &[Writers::TextStdout, Writers::Json]
    }

    /// Map each value to a possible value in clap
    fn to_possible_value(&self) -> Option<PossibleValue> {
        match &self {
            Writers::TextStdout => Some(PossibleValue::new("textstdout")),
            Writers::Json => Some(PossibleValue::new("json")),
        }
    }
}
