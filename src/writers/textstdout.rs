//! Write the results to standard output
//! It is the default writer, it presents the results in a text format and
//! prints it on STDOUT.

use super::Writer;
use crate::models::{CycleReport, PatchCveBundle};

/// A writer to print the results in the terminal.
#[derive(Default)]
pub struct TextStdoutWriter {}

impl TextStdoutWriter {
    /// Creates a new TextStdoutWriter
    pub fn new() -> Self {
        Self {}
    }
}

impl Writer for TextStdoutWriter {
    /// Prints the report on STDOUT
    fn write_cycle(&self, report: &CycleReport) {
        println!("----------Android Security Bulletins----------\n");
        if !report.index_reachable {
            println!("The bulletins index couldn't be read, only the known bulletins were checked");
        }

        if report.new_bulletins.is_empty() {
            println!("No new bulletin found");
        } else {
            println!("{} new bulletins found:", report.new_bulletins.len());
            for bulletin in &report.new_bulletins {
                println!("  [{}] {}", bulletin.security_patch, bulletin.url);
            }
        }
        println!("{} bulletins known", report.known_bulletins);

        if !report.cached.is_empty() {
            println!("CVE details fetched for {} bulletins", report.cached.len());
        }
        if report.pending.is_empty() {
            println!("The CVE details of all the bulletins are complete");
        } else {
            let pending: Vec<String> = report.pending.iter().map(|d| d.to_string()).collect();
            println!(
                "CVE details still missing for {} bulletins: {}",
                pending.len(),
                pending.join(", ")
            );
        }

        match &report.latest {
            Some(latest) => {
                println!("\nLatest security patch: {}", latest.security_patch);
                println!("Details: {}", latest.url);
            }
            None => println!("\nWarning: no security patch has been recorded yet"),
        }
    }

    /// Prints the newest bulletin and its CVEs on STDOUT
    fn write_newest(&self, bundle: Option<&PatchCveBundle>) {
        let bundle = match bundle {
            Some(b) => b,
            None => {
                println!("No bulletin found in the index");
                return;
            }
        };

        println!("Latest security patch: {}", bundle.security_patch);
        println!("Details: {}", bundle.url);
        println!("CVE count: {}\n", bundle.cve_count);
        for cve in &bundle.cve_details {
            let details: Vec<String> = cve
                .details
                .iter()
                .map(|(header, value)| format!("{}: {}", header, value.as_str().unwrap_or_default()))
                .collect();
            println!("[{}] {}", cve.cve_id, details.join(" | "));
        }
    }
}
