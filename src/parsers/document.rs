//! A typed view over a HTML document.
//!
//! The accessors return empty results when the structure is absent, except
//! [`Document::first_table`], used at the root of the index page.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::errors::TrackerError;

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| selector("th"));
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("Invalid CSS selector.")
}

/// The text of an element: every text node trimmed, the empty ones dropped.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses the text of a document. Parsing never fails, broken HTML
    /// simply yields fewer elements.
    pub fn parse(text: &str) -> Self {
        Document {
            html: Html::parse_document(text),
        }
    }

    /// All the tables of the document, nested ones included, in document
    /// order.
    pub fn tables(&self) -> Vec<Table<'_>> {
        self.html
            .select(&TABLE)
            .map(|element| Table { element })
            .collect()
    }

    /// The first table of the document.
    pub fn first_table(&self) -> Result<Table<'_>, TrackerError> {
        self.html
            .select(&TABLE)
            .next()
            .map(|element| Table { element })
            .ok_or_else(|| TrackerError::Parse("no table found in the document".to_string()))
    }
}

/// A table of a [`Document`].
#[derive(Clone, Copy)]
pub struct Table<'a> {
    element: ElementRef<'a>,
}

impl<'a> Table<'a> {
    /// All the rows of the table, the header row included.
    pub fn rows(&self) -> Vec<Row<'a>> {
        self.element
            .select(&ROW)
            .map(|element| Row { element })
            .collect()
    }

    /// The text of every header cell (`th`) of the table.
    pub fn headers(&self) -> Vec<String> {
        self.element
            .select(&HEADER_CELL)
            .map(|th| element_text(&th))
            .collect()
    }
}

/// A row of a [`Table`].
#[derive(Clone, Copy)]
pub struct Row<'a> {
    element: ElementRef<'a>,
}

impl<'a> Row<'a> {
    /// The data cells (`td`) of the row. Header cells are not included.
    pub fn cells(&self) -> Vec<Cell<'a>> {
        self.element
            .select(&DATA_CELL)
            .map(|element| Cell { element })
            .collect()
    }
}

/// A data cell of a [`Row`].
#[derive(Clone, Copy)]
pub struct Cell<'a> {
    element: ElementRef<'a>,
}

impl Cell<'_> {
    /// The text of the cell.
    pub fn text(&self) -> String {
        element_text(&self.element)
    }

    /// The targets of the links of the cell, as written in the document.
    pub fn links(&self) -> Vec<String> {
        self.element
            .select(&LINK)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_without_table() {
        let document = Document::parse("<html><body><p>Nothing here</p></body></html>");
        assert!(document.tables().is_empty());
        assert!(matches!(
            document.first_table(),
            Err(TrackerError::Parse(_))
        ));
    }

    #[test]
    fn rows_cells_and_text() {
        let document = Document::parse(
            r#"<table>
                 <tr><th> CVE </th><th>Type</th></tr>
                 <tr><td>
                   CVE-2024-0001
                 </td><td><b>EoP</b> <i>High</i></td></tr>
               </table>"#,
        );
        let table = document.first_table().unwrap();
        assert_eq!(vec!["CVE", "Type"], table.headers());

        let rows = table.rows();
        assert_eq!(2, rows.len());
        assert!(rows[0].cells().is_empty());
        let cells = rows[1].cells();
        assert_eq!("CVE-2024-0001", cells[0].text());
        assert_eq!("EoPHigh", cells[1].text());
    }

    #[test]
    fn links_of_a_cell() {
        let document = Document::parse(
            r#"<table><tr><td>
                 <a href="/a?hl=en">en</a><a name="anchor">none</a><a href="/a?hl=fr">fr</a>
               </td></tr></table>"#,
        );
        let table = document.first_table().unwrap();
        let cells = table.rows()[0].cells();
        assert_eq!(vec!["/a?hl=en", "/a?hl=fr"], cells[0].links());
    }
}
