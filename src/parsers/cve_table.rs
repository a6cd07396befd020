//! The extractor of the CVEs listed in a bulletin.
//!
//! A bulletin contains several tables, one per component. Those having a
//! header mentioning "CVE" list one vulnerability per row.

use log::{debug, trace};
use serde_json::Value;

use super::document::{Document, Table};
use crate::models::CveRecord;

/// The text identifying the column of the CVE identifiers.
const CVE_HEADER_MARKER: &str = "CVE";

/// The CVEs extracted from a bulletin.
#[derive(Debug, Default, PartialEq)]
pub struct CveExtraction {
    /// The number of data rows of the CVE tables.
    /// Rows which didn't give a [`CveRecord`] are counted too.
    pub cve_count: usize,
    /// The CVEs, in the order of the document.
    pub cve_details: Vec<CveRecord>,
}

/// Extracts the CVEs of a bulletin.
#[derive(Default)]
pub struct CveTableExtractor {}

impl CveTableExtractor {
    /// Creates a new CveTableExtractor
    pub fn new() -> Self {
        CveTableExtractor {}
    }

    /// Extracts the CVEs of all the tables of the document.
    pub fn extract(&self, document: &Document) -> CveExtraction {
        trace!("Running CveTableExtractor::extract()");
        let mut extraction = CveExtraction::default();
        for table in document.tables() {
            self.extract_table(&table, &mut extraction);
        }
        debug!(
            "{} CVE rows found, {} CVE records extracted",
            extraction.cve_count,
            extraction.cve_details.len()
        );
        extraction
    }

    /// Extracts the CVEs of one table, if it has a CVE column.
    fn extract_table(&self, table: &Table, extraction: &mut CveExtraction) {
        let headers = table.headers();
        let cve_index = match headers.iter().position(|h| h.contains(CVE_HEADER_MARKER)) {
            Some(i) => i,
            None => return,
        };

        let rows = table.rows();
        // Skip the header row
        for row in rows.iter().skip(1) {
            let cells = row.cells();
            if cells.len() <= cve_index {
                continue;
            }

            let mut cve = CveRecord::new(&cells[cve_index].text());
            for (i, (header, cell)) in headers.iter().zip(cells.iter()).enumerate() {
                if i != cve_index {
                    cve.details
                        .insert(header.to_string(), Value::String(cell.text()));
                }
            }
            extraction.cve_details.push(cve);
        }

        // Every row of the table counts, even those without a CVE
        extraction.cve_count += rows.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(html: &str) -> CveExtraction {
        CveTableExtractor::new().extract(&Document::parse(html))
    }

    #[test]
    fn extracts_cves_with_details() {
        let extraction = extract(
            r#"<table>
                 <tr><th>CVE ID</th><th>Severity</th></tr>
                 <tr><td>CVE-2024-0001</td><td>High</td></tr>
                 <tr><td>CVE-2024-0002</td><td>Moderate</td></tr>
               </table>"#,
        );

        assert_eq!(2, extraction.cve_count);
        assert_eq!(2, extraction.cve_details.len());
        assert_eq!("CVE-2024-0001", extraction.cve_details[0].cve_id);
        assert_eq!(
            json!({"Severity": "High"}),
            Value::Object(extraction.cve_details[0].details.clone())
        );
        assert_eq!("CVE-2024-0002", extraction.cve_details[1].cve_id);
        assert_eq!(
            json!({"Severity": "Moderate"}),
            Value::Object(extraction.cve_details[1].details.clone())
        );
    }

    #[test]
    fn details_keep_column_order() {
        let extraction = extract(
            r#"<table>
                 <tr><th>类型</th><th>CVE</th><th>参考编号</th><th>严重程度</th></tr>
                 <tr><td>RCE</td><td>CVE-2024-0031</td><td>A-309286883</td><td>严重</td></tr>
               </table>"#,
        );

        let cve = &extraction.cve_details[0];
        assert_eq!("CVE-2024-0031", cve.cve_id);
        let keys: Vec<&String> = cve.details.keys().collect();
        assert_eq!(vec!["类型", "参考编号", "严重程度"], keys);
    }

    #[test]
    fn counts_rows_without_cve() {
        // The second row is too short to contain the CVE column, it is
        // still counted.
        let extraction = extract(
            r#"<table>
                 <tr><th>Component</th><th>CVE</th></tr>
                 <tr><td>Framework</td><td>CVE-2024-0010</td></tr>
                 <tr><td colspan="2">Nothing to see</td></tr>
               </table>"#,
        );

        assert_eq!(2, extraction.cve_count);
        assert_eq!(1, extraction.cve_details.len());
        assert_eq!(
            json!({"Component": "Framework"}),
            Value::Object(extraction.cve_details[0].details.clone())
        );
    }

    #[test]
    fn short_rows_keep_available_details() {
        let extraction = extract(
            r#"<table>
                 <tr><th>CVE</th><th>Type</th><th>Severity</th></tr>
                 <tr><td>CVE-2024-0020</td><td>EoP</td></tr>
               </table>"#,
        );

        assert_eq!(
            json!({"Type": "EoP"}),
            Value::Object(extraction.cve_details[0].details.clone())
        );
    }

    #[test]
    fn ignores_tables_without_cve_header() {
        let extraction = extract(
            r#"<table>
                 <tr><th>Version</th><th>Date</th></tr>
                 <tr><td>1.0</td><td>2024-03-04</td></tr>
               </table>
               <table>
                 <tr><th>cve</th><th>Type</th></tr>
                 <tr><td>CVE-2024-0003</td><td>ID</td></tr>
               </table>
               <table>
                 <tr><th>CVE</th><th>Type</th></tr>
                 <tr><td>CVE-2024-0004</td><td>DoS</td></tr>
               </table>"#,
        );

        assert_eq!(1, extraction.cve_count);
        assert_eq!(1, extraction.cve_details.len());
        assert_eq!("CVE-2024-0004", extraction.cve_details[0].cve_id);
    }

    #[test]
    fn document_without_tables() {
        assert_eq!(CveExtraction::default(), extract("<p>No CVE this month</p>"));
    }
}
