//! Department directory scraper.
//!
//! The directory is a plain HTML table, one member per `<tr>`. Cell text is
//! run together when the row is flattened, so a space is put back in front of
//! every run of capital letters before the row is split into tokens:
//!
//! ```text
//! <tr><td>Smith, Jane</td><td>Professor</td></tr>  →  ["Smith,", "Jane", "Professor"]
//! ```
//!
//! Everything past token extraction is delegated to [`crate::names`], so the
//! scraping heuristic can change without touching the matcher.

use crate::names::{canonical_name, is_placeholder};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};

/// The astronomy department's public member directory.
pub const DEFAULT_DIRECTORY_URL: &str = "https://www.astro.umd.edu/people/directory.html";

/// `(first token, last token)` pairs that identify table header rows.
const HEADER_ROWS: &[(&str, &str)] = &[("Last", "Website"), ("Tenured/", "Numbers")];

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static UPPERCASE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z]+)").unwrap());

/// Fetch the directory page and extract the canonical member names.
#[instrument(level = "info", skip(client))]
pub async fn fetch_department_names(client: &Client, url: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!(bytes = html.len(), "Fetched directory page");

    let names = department_names(&html);
    info!(
        count = names.len(),
        distinct = names.iter().unique().count(),
        source = url,
        "Extracted department names"
    );
    Ok(names)
}

/// Split every table row of the page into name tokens.
pub fn row_tokens(html: &str) -> Vec<Vec<String>> {
    let document = Html::parse_document(html);
    document
        .select(&ROW_SELECTOR)
        .map(|row| {
            let text = row.text().collect::<String>();
            UPPERCASE_RUN
                .replace_all(&text, " ${1}")
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

fn is_header(tokens: &[String]) -> bool {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => HEADER_ROWS
            .iter()
            .any(|(head, tail)| first == head && last == tail),
        _ => false,
    }
}

/// Canonical names of every person listed on a directory page, in page order.
///
/// Header rows, placeholder rows and rows too short to hold a name are
/// skipped. Duplicates are kept.
pub fn department_names(html: &str) -> Vec<String> {
    let mut names = Vec::new();
    for tokens in row_tokens(html) {
        if is_header(&tokens) {
            continue;
        }
        match canonical_name(&tokens) {
            Some(name) if is_placeholder(&name) => {
                debug!(%name, "Skipping placeholder row");
            }
            Some(name) => names.push(name),
            None => {
                debug!(tokens = ?tokens, "Skipping row without a name");
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTORY_PAGE: &str = r#"
        <html><body>
        <table>
          <tr><th>Last Name</th><th>First Name</th><th>Title</th><th>Website</th></tr>
          <tr><td>Last, First</td><td>Title</td></tr>
          <tr><td>Smith,</td><td>Jane</td><td>Professor</td></tr>
          <tr><td>Doe,</td><td>J.</td><td>Quinn</td><td>Researcher</td></tr>
          <tr><td>Garcia-Lopez,</td><td>Ana</td><td>Student</td></tr>
          <tr><td>Conference</td><td>Room 1113</td></tr>
          <tr></tr>
        </table>
        <table>
          <tr><th>Tenured/Tenure-Track Faculty</th><th>Phone Numbers</th></tr>
          <tr><td>Smith,</td><td>Jane</td><td>Professor</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_row_tokens_split_concatenated_cells() {
        let html = "<table><tr><td>Smith,</td><td>Jane</td><td>Professor</td></tr></table>";
        assert_eq!(row_tokens(html), vec![vec!["Smith,", "Jane", "Professor"]]);

        let html = "<table><tr><td>SmithJaneProfessor</td></tr></table>";
        assert_eq!(row_tokens(html), vec![vec!["Smith", "Jane", "Professor"]]);
    }

    #[test]
    fn test_uppercase_runs_stay_together() {
        let html = "<table><tr><td>SmithJaneNASA</td></tr></table>";
        assert_eq!(row_tokens(html), vec![vec!["Smith", "Jane", "NASA"]]);
    }

    #[test]
    fn test_header_rows() {
        let header = vec!["Last".to_string(), "Name".to_string(), "Website".to_string()];
        assert!(is_header(&header));
        let member = vec!["Last".to_string(), "Jane".to_string()];
        assert!(!is_header(&member));
        assert!(!is_header(&[]));
    }

    #[test]
    fn test_department_names() {
        assert_eq!(
            department_names(DIRECTORY_PAGE),
            vec![
                "jane smith".to_string(),
                "quinn j. doe".to_string(),
                "ana garcia-lopez".to_string(),
                "jane smith".to_string(),
            ]
        );
    }

    #[test]
    fn test_placeholder_and_room_rows_are_dropped() {
        let names = department_names(DIRECTORY_PAGE);
        assert!(!names.iter().any(|n| n == "first last"));
        assert!(!names.iter().any(|n| n.starts_with("room")));
    }
}
