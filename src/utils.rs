//! Utility functions for target dates, log-friendly strings and output
//! directory checks.

use chrono::{Duration, NaiveDate, Utc};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Offset the digest calendar is kept in (JST, UTC+9).
const DIGEST_UTC_OFFSET_HOURS: i64 = 9;

/// Today's date in the digest's timezone, as `YYYY-MM-DD`.
pub fn today_digest_date() -> String {
    (Utc::now() + Duration::hours(DIGEST_UTC_OFFSET_HOURS))
        .date_naive()
        .to_string()
}

/// Validate a `YYYY-MM-DD` date and return it in canonical form.
///
/// # Errors
///
/// Returns an error naming the expected format when `date` does not parse.
pub fn parse_target_date(date: &str) -> Result<String, Box<dyn Error>> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date {date:?} (expected YYYY-MM-DD): {e}"))?;
    Ok(parsed.format("%Y-%m-%d").to_string())
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` characters with an ellipsis and the
/// number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a scratch file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let scratch = format!("{}/.digest-write-check", path.trim_end_matches('/'));
    match stdfs::File::create(&scratch) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
