//! Run configuration.
//!
//! Settings are resolved once at startup from three layers, highest first:
//!
//! 1. Command-line flags ([`Cli`])
//! 2. An optional YAML file passed with `--config`
//! 3. Built-in defaults
//!
//! ```yaml
//! output_dir: data
//! category: physics:astro-ph
//! directory_url: https://www.astro.umd.edu/people/directory.html
//! oai_endpoint: http://export.arxiv.org/oai2
//! days: 7
//! ```

use crate::cli::Cli;
use crate::scrapers::arxiv::{DEFAULT_CATEGORY, DEFAULT_OAI_ENDPOINT};
use crate::scrapers::directory::DEFAULT_DIRECTORY_URL;
use crate::utils::date_window;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Errors raised while resolving the run configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Read { path: PathBuf, source: std::io::Error },
    /// The config file is not valid YAML for [`FileConfig`].
    Parse { path: PathBuf, source: serde_yaml::Error },
    /// The look-back window must cover at least one day and start on a
    /// representable date.
    InvalidWindow(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
            ConfigError::InvalidWindow(days) => {
                write!(
                    f,
                    "look-back window must be at least one day and end after the earliest date, got {days}"
                )
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::InvalidWindow(_) => None,
        }
    }
}

/// Contents of the optional YAML config file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub output_dir: Option<PathBuf>,
    pub category: Option<String>,
    pub directory_url: Option<String>,
    pub oai_endpoint: Option<String>,
    pub days: Option<u32>,
}

impl FileConfig {
    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub category: String,
    pub directory_url: String,
    pub oai_endpoint: String,
    pub window_days: u32,
    /// The day the run is for; names the output files and ends the window.
    pub run_date: NaiveDate,
}

impl Settings {
    /// Resolve settings from the command line, reading `--config` if given.
    #[instrument(level = "info", skip_all)]
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => {
                info!(path = %path.display(), "Loading config file");
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };
        let settings = Self::merge(cli, file, Local::now().date_naive())?;
        info!(
            output_dir = %settings.output_dir.display(),
            category = %settings.category,
            window_days = settings.window_days,
            run_date = %settings.run_date,
            "Resolved settings"
        );
        Ok(settings)
    }

    /// Layer CLI flags over file values over defaults.
    pub fn merge(cli: &Cli, file: FileConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        let window_days = cli.days.or(file.days).unwrap_or(DEFAULT_WINDOW_DAYS);
        let run_date = cli.date.unwrap_or(today);
        if window_days == 0 || date_window(run_date, window_days).is_none() {
            return Err(ConfigError::InvalidWindow(window_days));
        }

        Ok(Self {
            output_dir: cli
                .output_dir
                .clone()
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            category: cli
                .category
                .clone()
                .or(file.category)
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            directory_url: cli
                .directory_url
                .clone()
                .or(file.directory_url)
                .unwrap_or_else(|| DEFAULT_DIRECTORY_URL.to_string()),
            oai_endpoint: cli
                .oai_endpoint
                .clone()
                .or(file.oai_endpoint)
                .unwrap_or_else(|| DEFAULT_OAI_ENDPOINT.to_string()),
            window_days,
            run_date,
        })
    }
}
