//! Utility functions for date windows, string cleanup, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Date window computation for the listing query
//! - Whitespace collapsing and truncation for parsed text and logs
//! - File system validation for the output directory

use chrono::{Days, NaiveDate};
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Inclusive `(from, until)` window ending on `run_date` and reaching back `days` days.
///
/// Returns `None` when the start of the window falls before the earliest
/// representable date.
///
/// # Examples
///
/// ```ignore
/// let today = NaiveDate::from_ymd_opt(2024, 10, 8).unwrap();
/// assert_eq!(date_window(today, 7).unwrap().0, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
/// ```
pub fn date_window(run_date: NaiveDate, days: u32) -> Option<(NaiveDate, NaiveDate)> {
    let from = run_date.checked_sub_days(Days::new(u64::from(days)))?;
    Some((from, run_date))
}

/// Collapse every run of whitespace into one space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (backing off to a char
/// boundary) with an ellipsis and byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_window_is_one_week() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 8).unwrap();
        let (from, until) = date_window(today, 7).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert_eq!(until, today);
    }

    #[test]
    fn test_date_window_crosses_year() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let (from, _) = date_window(today, 7).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 12, 27).unwrap());
    }

    #[test]
    fn test_date_window_before_earliest_date() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 8).unwrap();
        assert_eq!(date_window(today, 100_000_000), None);
        assert_eq!(date_window(NaiveDate::MIN, 1), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Dust in\n   Nearby\tGalaxies "), "Dust in Nearby Galaxies");
        assert_eq!(collapse_whitespace("\n \t"), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let s = "é".repeat(10);
        assert_eq!(truncate_for_log(&s, 3), "é…(+18 bytes)");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let dir = std::env::temp_dir().join(format!("department_papers_writable_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        ensure_writable_dir(&dir).await.unwrap();
        assert!(dir.is_dir());
        assert!(!dir.join("..__probe_write__").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
