//! JSON persistence of the digest.
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! └── entries/
//!     ├── 2024-05-01.json
//!     └── 2024-05-02.json
//! ```
//!
//! A rerun for the same date overwrites that date's file.

use crate::models::Digest;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Location of a date's digest, relative to the site root.
///
/// This is the value stored in the index.
pub fn digest_pointer(data_dir: &str, date: &str) -> String {
    format!("{}/entries/{}.json", data_dir.trim_end_matches('/'), date)
}

/// Write `digest` to `{data_dir}/entries/{date}.json` and return its index
/// pointer.
#[instrument(level = "info", skip_all, fields(%data_dir, date = %digest.date))]
pub async fn write_digest(digest: &Digest, data_dir: &str) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(digest)?;

    let entries_dir = format!("{}/entries", data_dir.trim_end_matches('/'));
    if let Err(e) = fs::create_dir_all(&entries_dir).await {
        error!(%entries_dir, error = %e, "Failed to create entries dir");
        return Err(e.into());
    }

    let path = digest_pointer(data_dir, &digest.date);
    fs::write(&path, json).await?;
    info!(%path, items = digest.meta.item_count, "Wrote digest JSON");
    Ok(path)
}
