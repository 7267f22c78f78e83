//! Date index management.
//!
//! The index (`{data_dir}/index.json`) maps every processed date to the
//! location of its digest:
//!
//! ```json
//! { "entries": { "2024-05-01": "data/entries/2024-05-01.json" } }
//! ```
//!
//! Entries accumulate one per date and are always written sorted by date.
//! Concurrent writers are not coordinated; the last write wins.

use crate::models::DigestIndex;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

pub fn index_path(data_dir: &str) -> String {
    format!("{}/index.json", data_dir.trim_end_matches('/'))
}

/// Load the index, or an empty one if the file does not exist yet.
#[instrument(level = "info", skip_all, fields(%data_dir))]
pub async fn load_index(data_dir: &str) -> Result<DigestIndex, Box<dyn Error>> {
    let path = index_path(data_dir);
    if !Path::new(&path).exists() {
        warn!(%path, "No index yet; starting a new one");
        return Ok(DigestIndex::default());
    }
    let raw = fs::read_to_string(&path).await?;
    let index: DigestIndex = serde_json::from_str(&raw)?;
    info!(%path, entries = index.entries.len(), "Loaded index");
    Ok(index)
}

#[instrument(level = "info", skip_all, fields(%data_dir))]
pub async fn save_index(index: &DigestIndex, data_dir: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(data_dir).await?;
    let path = index_path(data_dir);
    fs::write(&path, serde_json::to_string_pretty(index)?).await?;
    info!(%path, entries = index.entries.len(), "Wrote index");
    Ok(())
}

/// Load, record `date -> pointer`, and save the index.
pub async fn update_index(
    data_dir: &str,
    date: &str,
    pointer: &str,
) -> Result<DigestIndex, Box<dyn Error>> {
    let mut index = load_index(data_dir).await?;
    index.update(date, pointer);
    save_index(&index, data_dir).await?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_index_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let index = load_index(dir.path().to_str().unwrap()).await.unwrap();
        assert!(index.entries.is_empty());
    }

    #[tokio::test]
    async fn test_update_accumulates_sorted_entries() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_str().unwrap();

        update_index(data_dir, "2024-05-02", "data/entries/2024-05-02.json").await.unwrap();
        update_index(data_dir, "2024-04-30", "data/entries/2024-04-30.json").await.unwrap();
        update_index(data_dir, "2024-05-02", "data/entries/2024-05-02.json").await.unwrap();

        let raw = std::fs::read_to_string(index_path(data_dir)).unwrap();
        let first = raw.find("2024-04-30").unwrap();
        let second = raw.find("2024-05-02").unwrap();
        assert!(first < second);

        let index = load_index(data_dir).await.unwrap();
        assert_eq!(index.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_index_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_str().unwrap();
        std::fs::write(index_path(data_dir), "{not json").unwrap();
        assert!(load_index(data_dir).await.is_err());
    }
}
