//! Run orchestration: fetch listings and the directory, then cross-reference.

use crate::config::{ConfigError, Settings};
use crate::matching::{all_author_entries, cross_reference, first_author_entries};
use crate::models::{DepartmentPapers, PaperRecord};
use crate::names::NameError;
use crate::scrapers::{arxiv, directory};
use crate::utils::date_window;
use reqwest::Client;
use std::error::Error;
use tracing::{info, instrument};

/// Cross-reference already-fetched papers against the department names.
pub fn department_papers(
    papers: &[PaperRecord],
    names: &[String],
) -> Result<DepartmentPapers, NameError> {
    let authors = all_author_entries(papers);
    let first = first_author_entries(papers);
    info!(
        papers = papers.len(),
        author_entries = authors.len(),
        first_author_entries = first.len(),
        "Flattened author lists"
    );

    Ok(DepartmentPapers {
        first_authors: cross_reference(&first, names, papers)?,
        authors: cross_reference(&authors, names, papers)?,
    })
}

/// Fetch the listing window and the directory, then cross-reference them.
///
/// The two fetches are independent and run concurrently; either failing
/// aborts the run.
#[instrument(level = "info", skip_all, fields(run_date = %settings.run_date))]
pub async fn aggregate_department_papers(
    client: &Client,
    settings: &Settings,
) -> Result<DepartmentPapers, Box<dyn Error>> {
    let (from, until) = date_window(settings.run_date, settings.window_days)
        .ok_or(ConfigError::InvalidWindow(settings.window_days))?;

    let (papers, names) = futures::try_join!(
        arxiv::fetch_papers(
            client,
            &settings.oai_endpoint,
            &settings.category,
            from,
            until
        ),
        directory::fetch_department_names(client, &settings.directory_url),
    )?;

    let results = department_papers(&papers, &names)?;
    info!(
        first_author_matches = results.first_authors.len(),
        author_matches = results.authors.len(),
        "Cross-referenced department names"
    );
    Ok(results)
}
