//! Command-line interface definitions for department_papers.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option is optional: anything left out falls back to the YAML config
//! file (when `--config` is given) and then to the built-in defaults in
//! [`crate::config`].

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the department_papers application.
///
/// # Examples
///
/// ```sh
/// # Write this week's results to ./data
/// department_papers
///
/// # Reproduce the run for a given day into another directory
/// department_papers --date 2024-10-08 -o ./archive
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the JSON result files [default: data]
    #[arg(short, long, env = "DEPARTMENT_PAPERS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// OAI-PMH set to harvest [default: physics:astro-ph]
    #[arg(long)]
    pub category: Option<String>,

    /// Department directory page
    #[arg(long)]
    pub directory_url: Option<String>,

    /// OAI-PMH endpoint of the preprint repository
    #[arg(long)]
    pub oai_endpoint: Option<String>,

    /// Number of days to look back from the run date [default: 7]
    #[arg(long)]
    pub days: Option<u32>,

    /// Run date (YYYY-MM-DD) used for the window and the file names [default: today]
    #[arg(long)]
    pub date: Option<NaiveDate>,
}
