//! Command-line interface definitions for the daily digest.
//!
//! All arguments can be provided via command-line flags; credentials and the
//! feed template can also come from environment variables.

use crate::sources::DEFAULT_TIMEOUT;
use crate::sources::rss::DEFAULT_URL_TEMPLATE;
use clap::{Parser, ValueEnum};

/// Which external search capability candidates are collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Brave Search news API, with web search as a fallback.
    Brave,
    /// An RSS search feed (Bing News by default).
    Rss,
}

/// Command-line arguments for the daily digest generator.
///
/// # Examples
///
/// ```sh
/// # Today's digest (JST) into ./data using Brave
/// BRAVE_API_KEY=... daily_news_digest
///
/// # A specific date from the RSS source, plus Markdown
/// daily_news_digest --date 2024-05-01 --source rss -m ./markdown
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Target date in YYYY-MM-DD (defaults to today in JST)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Directory holding index.json and entries/
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Optional output directory for a Markdown rendering
    #[arg(short, long)]
    pub markdown_output_dir: Option<String>,

    /// Optional path to a YAML curation config
    #[arg(short, long)]
    pub config: Option<String>,

    /// Search source to collect candidates from
    #[arg(long, value_enum, default_value_t = SourceKind::Brave)]
    pub source: SourceKind,

    /// Brave Search API key
    #[arg(long, env = "BRAVE_API_KEY", hide_env_values = true)]
    pub brave_api_key: Option<String>,

    /// RSS search URL with a `{query}` placeholder
    #[arg(long, env = "RSS_URL_TEMPLATE", default_value = DEFAULT_URL_TEMPLATE)]
    pub rss_url_template: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}
