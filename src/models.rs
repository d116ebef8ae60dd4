//! Data models for scraped papers and cross-reference results.
//!
//! This module defines the core data structures used throughout the application:
//! - [`PaperRecord`]: One arXiv listing as returned by the OAI-PMH endpoint
//! - [`AuthorEntry`]: A flattened `(paper index, author string)` pair
//! - [`AuthorPapers`]: Canonical member name mapped to a matched paper title
//! - [`DepartmentPapers`]: The first-author and all-author results of one run

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single paper listed in the preprint repository.
///
/// Author strings are lowercased `"<forenames> <keyname>"` renderings, in the
/// order the source lists them. The first entry is the first author.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PaperRecord {
    /// The arXiv identifier, e.g. `2410.01234`.
    pub id: String,
    /// Title with whitespace collapsed.
    pub title: String,
    /// Space-separated category list, e.g. `astro-ph.GA astro-ph.CO`.
    pub categories: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub doi: Option<String>,
    /// Creation date as listed by the source (`YYYY-MM-DD`).
    pub created: String,
    pub updated: Option<String>,
    /// Ordered author strings.
    pub authors: Vec<String>,
    /// Affiliations of all authors, in listing order.
    pub affiliation: Vec<String>,
    /// Abstract page URL.
    pub url: String,
}

impl PaperRecord {
    /// The first listed author, if the record has any.
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}

/// One author slot of one paper, flattened out of a [`PaperRecord`] list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorEntry<'a> {
    /// Index of the paper in the scraped record list.
    pub paper: usize,
    /// The author string exactly as it appears on the paper.
    pub author: &'a str,
}

/// Canonical member name → title of the last paper matched for that name.
pub type AuthorPapers = BTreeMap<String, String>;

/// Cross-reference results for a single run.
#[derive(Debug, Default, PartialEq)]
pub struct DepartmentPapers {
    /// Matches restricted to the first author of each paper.
    pub first_authors: AuthorPapers,
    /// Matches across every author position.
    pub authors: AuthorPapers,
}
