//! # department_papers
//!
//! Finds which members of the astronomy department appeared on arXiv over the
//! last week, as first author and in any author position.
//!
//! ## Usage
//!
//! ```sh
//! department_papers -o ./data
//! ```
//!
//! ## Architecture
//!
//! The application is a linear batch job:
//! 1. **Fetching**: Harvest the week's `physics:astro-ph` listings and the
//!    department directory page (concurrently)
//! 2. **Normalizing**: Turn directory rows into canonical member names
//! 3. **Matching**: Compare name variants against first authors and all authors
//! 4. **Output**: Write `first_authors_<date>.json` and `authors_<date>.json`

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod matching;
mod models;
mod names;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::Settings;
use outputs::json;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("department_papers starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = Settings::from_cli(&args)?;

    // Early check: fail before scraping if results cannot be written
    if let Err(e) = ensure_writable_dir(&settings.output_dir).await {
        error!(
            path = %settings.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let results = aggregate::aggregate_department_papers(&client, &settings).await?;

    let (first_path, all_path) =
        json::write_department_papers(&results, &settings.output_dir, settings.run_date).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        first_authors = %first_path.display(),
        authors = %all_path.display(),
        first_author_matches = results.first_authors.len(),
        author_matches = results.authors.len(),
        "Execution complete"
    );

    Ok(())
}
