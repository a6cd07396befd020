//! The parser of the bulletins index.
//!
//! The index is a table listing one bulletin per row, newest first. The
//! second column contains the links to the bulletin in every language,
//! the tracked one is recognized by its `hl=` query parameter.

use chrono::NaiveDate;
use log::{debug, trace};
use regex::Regex;
use url::Url;

use super::document::Document;
use crate::errors::TrackerError;
use crate::models::BulletinRecord;

/// Rows with fewer cells are ads or separators.
const MIN_CELLS: usize = 4;

/// Turns the index page into a list of bulletins.
pub struct BulletinIndexParser {
    /// The URL of the index, relative links are resolved against it
    base_url: Url,
    /// What a link must contain to be in the tracked locale
    /// Example: hl=zh-cn
    locale_marker: String,
    /// The regex extracting the patch date from a bulletin URL
    date_regex: Regex,
}

impl BulletinIndexParser {
    /// Creates the parser.
    /// By doing so, the regex is compiled once and the parser can be
    /// reused.
    pub fn new(index_url: &str, locale: &str) -> Result<Self, TrackerError> {
        let base_url = Url::parse(index_url)
            .map_err(|e| TrackerError::InvalidConfig(format!("index URL {}: {}", index_url, e)))?;
        // Example: https://source.android.com/docs/security/bulletin/2024-03-01?hl=zh-cn
        let date_regex = Regex::new(&format!(
            r"/(?P<date>\d{{4}}-\d{{2}}-\d{{2}})\?hl={}",
            regex::escape(locale)
        ))
        .map_err(|e| TrackerError::InvalidConfig(format!("locale {}: {}", locale, e)))?;

        Ok(BulletinIndexParser {
            base_url,
            locale_marker: format!("hl={}", locale),
            date_regex,
        })
    }

    /// Extracts the security patch date from the URL of a bulletin.
    /// Returns `None` if the URL doesn't follow the expected pattern or if
    /// the date doesn't exist.
    pub fn extract_patch_date(&self, url: &str) -> Option<NaiveDate> {
        let caps = self.date_regex.captures(url)?;
        NaiveDate::parse_from_str(&caps["date"], "%Y-%m-%d").ok()
    }

    /// Lists the bulletins of the index, in the order of the document.
    pub fn parse(&self, document: &Document) -> Result<Vec<BulletinRecord>, TrackerError> {
        trace!("Running BulletinIndexParser::parse()");
        let table = document.first_table()?;
        let mut bulletins = Vec::new();

        // The first row contains the headers
        for row in table.rows().into_iter().skip(1) {
            let cells = row.cells();
            if cells.len() < MIN_CELLS {
                trace!("Ignoring a row with {} cells", cells.len());
                continue;
            }

            let url = match self.localized_link(&cells[1].links()) {
                Some(u) => u,
                None => {
                    debug!("No {} link found in the row, ignored", self.locale_marker);
                    continue;
                }
            };

            match self.extract_patch_date(&url) {
                Some(security_patch) => bulletins.push(BulletinRecord::new(&url, security_patch)),
                None => debug!("No patch date found in {}, ignored", url),
            }
        }

        debug!("{} bulletins found in the index", bulletins.len());
        Ok(bulletins)
    }

    /// Finds the first link in the tracked locale, and makes it absolute.
    fn localized_link(&self, hrefs: &[String]) -> Option<String> {
        hrefs
            .iter()
            .filter(|href| href.contains(&self.locale_marker))
            .find_map(|href| self.base_url.join(href).ok())
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_URL: &str =
        "https://source.android.com/docs/security/bulletin/asb-overview?hl=zh-cn";

    fn parser() -> BulletinIndexParser {
        BulletinIndexParser::new(INDEX_URL, "zh-cn").unwrap()
    }

    fn row(date: &str, links: &str) -> String {
        format!(
            "<tr><td>{date}</td><td>{links}</td><td>{date}</td><td>{date}</td></tr>",
            date = date,
            links = links
        )
    }

    #[test]
    fn extracts_patch_date() {
        let parser = parser();
        assert_eq!(
            NaiveDate::from_ymd_opt(2024, 3, 1),
            parser.extract_patch_date(
                "https://source.android.com/docs/security/bulletin/2024-03-01?hl=zh-cn"
            )
        );
    }

    #[test]
    fn doesnt_extract_patch_date() {
        let parser = parser();
        // Other locale
        assert!(parser
            .extract_patch_date("https://source.android.com/docs/security/bulletin/2024-03-01?hl=en")
            .is_none());
        // No date
        assert!(parser
            .extract_patch_date("https://source.android.com/docs/security/bulletin/pixel?hl=zh-cn")
            .is_none());
        // Not a real date
        assert!(parser
            .extract_patch_date("https://source.android.com/docs/security/bulletin/2024-13-45?hl=zh-cn")
            .is_none());
    }

    #[test]
    fn parses_index_rows() {
        let html = format!(
            "<table><tr><th>Bulletin</th><th>Languages</th><th>Published</th><th>Patch</th></tr>{}{}{}{}{}</table>",
            row(
                "2024-03-01",
                r#"<a href="/docs/security/bulletin/2024-03-01?hl=en">English</a> <a href="/docs/security/bulletin/2024-03-01?hl=zh-cn">中文</a>"#
            ),
            // Malformed row
            "<tr><td colspan=\"4\">Advertisement</td></tr>",
            // No link in the tracked locale
            row("2024-02-01", r#"<a href="/docs/security/bulletin/2024-02-01?hl=en">English</a>"#),
            // Link in the tracked locale, but no date
            row("pixel", r#"<a href="/docs/security/bulletin/pixel?hl=zh-cn">中文</a>"#),
            row(
                "2024-01-01",
                r#"<a href="https://source.android.com/docs/security/bulletin/2024-01-01?hl=zh-cn">中文</a>"#
            ),
        );
        let bulletins = parser().parse(&Document::parse(&html)).unwrap();

        assert_eq!(2, bulletins.len());
        assert_eq!(
            "https://source.android.com/docs/security/bulletin/2024-03-01?hl=zh-cn",
            bulletins[0].url
        );
        assert_eq!(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            bulletins[0].security_patch
        );
        assert_eq!(
            "https://source.android.com/docs/security/bulletin/2024-01-01?hl=zh-cn",
            bulletins[1].url
        );
        for bulletin in &bulletins {
            let serialized = serde_json::to_value(bulletin).unwrap();
            let date = serialized["security_patch"].as_str().unwrap();
            assert!(Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap().is_match(date));
        }
    }

    #[test]
    fn index_without_table_is_an_error() {
        let result = parser().parse(&Document::parse("<p>Service unavailable</p>"));
        assert!(matches!(result, Err(TrackerError::Parse(_))));
    }

    #[test]
    fn invalid_index_url() {
        assert!(matches!(
            BulletinIndexParser::new("not a url", "zh-cn"),
            Err(TrackerError::InvalidConfig(_))
        ));
    }
}
