//! # Daily News Digest
//!
//! A daily news-curation pipeline. For a target date it queries a search
//! source per topic category, filters out listing pages, deduplicates,
//! ranks by source reputation, picks a domain-diverse handful per category
//! and writes a structured digest indexed by date.
//!
//! ## Usage
//!
//! ```sh
//! BRAVE_API_KEY=... daily_news_digest --date 2024-05-01 --data-dir ./data
//! ```
//!
//! ## Architecture
//!
//! 1. **Collection**: each category query goes to the selected source
//! 2. **Curation**: admit → dedupe → rank → diversify → summarize
//! 3. **Assembly**: sections are combined into one digest for the date
//! 4. **Output**: digest JSON, the date index and optional Markdown
//!
//! Collection failures never abort a run: a failed query contributes no
//! candidates and a digest is always written, even if every section is
//! empty.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod models;
mod outputs;
mod pipeline;
mod sources;
mod utils;

use cli::{Cli, SourceKind};
use config::CurationConfig;
use outputs::{indexes, json, markdown};
use pipeline::classify::UrlClassifier;
use pipeline::digest::{SOURCE_UNAVAILABLE, assemble};
use pipeline::section::Curator;
use sources::{BraveCollector, Collector, RssCollector, Source, http_client};
use utils::{ensure_writable_dir, parse_target_date, today_digest_date};

#[tokio::main]
#[instrument]
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
    info!("daily_news_digest starting up");

    let args = Cli::parse();
    debug!(?args.date, %args.data_dir, ?args.source, "Parsed CLI arguments");

    let target_date = match &args.date {
        Some(d) => parse_target_date(d)?,
        None => today_digest_date(),
    };
    info!(%target_date, "Target date");

    // Early check: ensure the data dir is writable before spending requests
    if let Err(e) = ensure_writable_dir(&args.data_dir).await {
        error!(
            path = %args.data_dir,
            error = %e,
            "Data directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Load curation config ----
    let config = match &args.config {
        Some(path) => CurationConfig::load(path)?,
        None => CurationConfig::default(),
    };
    let curator = Curator::new(&config)?;
    info!(
        categories = config.categories.len(),
        reputable_sources = config.priority_sources.len(),
        "Curation config ready"
    );

    // ---- Collect and curate ----
    let source = build_source(&args, &target_date, &config)?;
    let mut sections = Vec::with_capacity(config.categories.len());
    let source_mode = match &source {
        Some(source) => {
            let mut failed_queries = 0usize;
            let mut collected = 0usize;
            for category in &config.categories {
                let report = curator.build_section(category, source).await;
                for failure in &report.failures {
                    debug!(category = %category.id, query = %failure.query, reason = %failure.reason, "Failed query");
                }
                failed_queries += report.failures.len();
                collected += report.collected;
                sections.push(report.section);
            }
            if failed_queries > 0 {
                warn!(failed_queries, "Some queries failed and contributed no candidates");
            }
            info!(collected, "Collection finished");
            source.mode()
        }
        None => {
            warn!(source = ?args.source, "No collector available; writing an empty digest");
            SOURCE_UNAVAILABLE
        }
    };

    // ---- Assemble and persist ----
    let digest = assemble(&target_date, sections, &config, source_mode);
    let pointer = json::write_digest(&digest, &args.data_dir).await?;

    if let Err(e) = indexes::update_index(&args.data_dir, &digest.date, &pointer).await {
        error!(error = %e, "Failed to update index.json");
    }

    if let Some(dir) = &args.markdown_output_dir {
        if let Err(e) = markdown::write_markdown(&digest, dir).await {
            error!(path = %dir, error = %e, "Failed writing Markdown");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        path = %pointer,
        mode = %digest.meta.source_mode,
        items = digest.meta.item_count,
        "Execution complete"
    );

    Ok(())
}

/// Build the collector selected on the command line, or `None` when it
/// cannot run (Brave without an API key).
fn build_source(
    args: &Cli,
    target_date: &str,
    config: &CurationConfig,
) -> Result<Option<Source>, Box<dyn Error>> {
    let client = http_client(Duration::from_secs(args.timeout_secs))?;
    let classifier = UrlClassifier::new(&config.exclude_patterns)?;

    let source = match args.source {
        SourceKind::Brave => match args.brave_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Some(Source::Brave(BraveCollector::new(
                client,
                key,
                target_date,
                classifier,
            ))),
            _ => None,
        },
        SourceKind::Rss => Some(Source::Rss(RssCollector::new(
            client,
            args.rss_url_template.as_str(),
            target_date,
            classifier,
        ))),
    };
    Ok(source)
}
