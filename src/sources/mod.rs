//! Candidate collectors for news search sources.
//!
//! A [`Collector`] turns one search phrase into a list of [`RawResult`]s.
//! Failures are returned as an explicit [`CollectError`]; the section
//! builder treats a failed query as zero results and keeps going.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Brave Search | [`brave`] | News API, web API fallback | Requires `BRAVE_API_KEY` |
//! | RSS search | [`rss`] | RSS 2.0 feed per query | Bing News RSS by default |
//!
//! Every collector prefixes the target date to the query, so the same
//! category queries can be reused for any day.

pub mod brave;
pub mod rss;

use crate::models::RawResult;
use std::time::Duration;
use thiserror::Error;

pub use brave::BraveCollector;
pub use rss::RssCollector;

/// Per-request timeout used by every HTTP collector.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(25);

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

/// A search capability the pipeline collects candidates from.
pub trait Collector {
    /// Label recorded as the digest's `sourceMode`.
    fn mode(&self) -> &'static str;

    /// Collect candidates for a single search phrase.
    async fn collect(&self, query: &str) -> Result<Vec<RawResult>, CollectError>;
}

/// The collector chosen on the command line.
#[derive(Debug)]
pub enum Source {
    Brave(BraveCollector),
    Rss(RssCollector),
}

impl Collector for Source {
    fn mode(&self) -> &'static str {
        match self {
            Source::Brave(c) => c.mode(),
            Source::Rss(c) => c.mode(),
        }
    }

    async fn collect(&self, query: &str) -> Result<Vec<RawResult>, CollectError> {
        match self {
            Source::Brave(c) => c.collect(query).await,
            Source::Rss(c) => c.collect(query).await,
        }
    }
}

/// Build the shared HTTP client with the per-request timeout applied.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, CollectError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// `"<date> <query>"`, the phrase actually sent to a search source.
pub fn dated_query(target_date: &str, query: &str) -> String {
    format!("{} {}", target_date, query.trim())
}
