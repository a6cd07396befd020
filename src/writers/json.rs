//! Write the results as JSON
//! It presents the results in a JSON format and prints it on STDOUT.

use log::error;
use serde::Serialize;

use super::Writer;
use crate::models::{CycleReport, PatchCveBundle};

/// A writer to print the results as JSON.
#[derive(Default)]
pub struct JsonWriter {}

impl JsonWriter {
    /// Creates a new JsonWriter
    pub fn new() -> Self {
        Self {}
    }

    /// Turns any serializable value into the JSON document to print.
    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(value)
    }

    /// Prints any serializable value.
    /// Nothing else is printed on STDOUT, the logs go to STDERR.
    fn print<T: Serialize + ?Sized>(&self, value: &T) {
        match self.render(value) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Unable to serialize the results: {}", e),
        }
    }
}

impl Writer for JsonWriter {
    fn write_cycle(&self, report: &CycleReport) {
        self.print(report);
    }

    fn write_newest(&self, bundle: Option<&PatchCveBundle>) {
        self.print(&bundle);
    }
}
