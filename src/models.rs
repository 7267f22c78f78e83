//! Data models for raw search results and the curated digest.
//!
//! This module defines the records that flow through the curation pipeline:
//! - [`RawResult`]: an unfiltered candidate returned by a collector
//! - [`SectionItem`] / [`Section`]: curated items for one category
//! - [`Digest`]: the per-date output, with [`Headline`] and [`DigestMeta`]
//! - [`DigestIndex`]: the persisted date -> digest location map
//!
//! Everything serializes with camelCase field names. `Section::display_name`
//! and `Digest::top_highlights` keep the wire names (`name`, `top3`) that the
//! calendar viewer reads.

use crate::pipeline::normalize::normalize_domain;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One candidate news item returned by an external source.
///
/// `source` is always derived from `link` via [`normalize_domain`] and is the
/// empty string when the link does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResult {
    pub title: String,
    pub link: String,
    pub source: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub published_hint: Option<String>,
}

impl RawResult {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
        published_hint: Option<String>,
    ) -> Self {
        let link = link.into();
        Self {
            title: title.into(),
            source: normalize_domain(&link),
            link,
            snippet: snippet.into(),
            published_hint,
        }
    }
}

/// A topic category and the search phrases used to collect its candidates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategorySpec {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub queries: Vec<String>,
}

impl CategorySpec {
    pub fn new(id: &str, display_name: &str, queries: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            queries: queries.iter().map(|q| q.to_string()).collect(),
        }
    }
}

/// A curated, presentation-ready item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionItem {
    pub title: String,
    /// Always exactly three lines, see [`crate::pipeline::summarize::summarize`].
    pub summary_lines: Vec<String>,
    pub why_important: String,
    pub source: String,
    pub link: String,
}

/// The curated items for one category within a digest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub items: Vec<SectionItem>,
}

/// A flattened item summary used by the headline list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Headline {
    pub title: String,
    pub source: String,
    pub link: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestMeta {
    /// `"brave"`, `"rss"`, or `"unavailable"` when no collector ran.
    pub source_mode: String,
    pub category_count: usize,
    pub item_count: usize,
}

/// The per-date output record.
///
/// A digest is rebuilt from scratch on every run and replaces any earlier
/// digest written for the same date.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Digest {
    /// The target date in `YYYY-MM-DD` format.
    pub date: String,
    pub title: String,
    pub summary: String,
    pub sections: Vec<Section>,
    #[serde(rename = "top3")]
    pub top_highlights: Vec<String>,
    pub headlines: Vec<Headline>,
    pub meta: DigestMeta,
    pub generated_at: DateTime<Utc>,
}

/// Persisted mapping from date to digest location.
///
/// Backed by a `BTreeMap` so entries are always kept sorted by date key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DigestIndex {
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl DigestIndex {
    /// Record `pointer` for `date`, replacing any earlier entry.
    pub fn update(&mut self, date: &str, pointer: &str) {
        self.entries.insert(date.to_string(), pointer.to_string());
    }
}
