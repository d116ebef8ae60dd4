//! JSON output of the cross-reference results.
//!
//! Each mapping is written as a flat object of canonical name to paper title,
//! one file per mapping, named by the run date:
//!
//! ```text
//! output_dir/
//! ├── first_authors_2024-10-08.json
//! └── authors_2024-10-08.json
//! ```
//!
//! Files for a date that has already run are overwritten.

use crate::models::{AuthorPapers, DepartmentPapers};
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

pub const FIRST_AUTHORS_PREFIX: &str = "first_authors";
pub const AUTHORS_PREFIX: &str = "authors";

/// `{output_dir}/{prefix}_{YYYY-MM-DD}.json`
pub fn output_path(output_dir: &Path, prefix: &str, run_date: NaiveDate) -> PathBuf {
    output_dir.join(format!("{}_{}.json", prefix, run_date.format("%Y-%m-%d")))
}

/// Write one mapping to `{output_dir}/{prefix}_{run_date}.json`.
#[instrument(level = "info", skip(papers, output_dir), fields(output_dir = %output_dir.display(), entries = papers.len()))]
pub async fn write_author_papers(
    papers: &AuthorPapers,
    output_dir: &Path,
    prefix: &str,
    run_date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string(papers)?;
    let path = output_path(output_dir, prefix, run_date);

    info!(path = %path.display(), "Writing JSON");
    if let Err(e) = fs::write(&path, json).await {
        error!(path = %path.display(), error = %e, "Failed to write JSON");
        return Err(e.into());
    }
    info!(path = %path.display(), "Wrote JSON results");

    Ok(path)
}

/// Write both the first-author and the all-author files for a run.
pub async fn write_department_papers(
    results: &DepartmentPapers,
    output_dir: &Path,
    run_date: NaiveDate,
) -> Result<(PathBuf, PathBuf), Box<dyn Error>> {
    let first = write_author_papers(&results.first_authors, output_dir, FIRST_AUTHORS_PREFIX, run_date).await?;
    let all = write_author_papers(&results.authors, output_dir, AUTHORS_PREFIX, run_date).await?;
    Ok((first, all))
}
