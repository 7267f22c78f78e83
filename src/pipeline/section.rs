//! Per-category orchestration: collect → admit → dedupe → rank → select →
//! summarize.

use crate::config::{ConfigError, CurationConfig, SelectionLimits, why_important};
use crate::models::{CategorySpec, RawResult, Section, SectionItem};
use crate::pipeline::classify::UrlClassifier;
use crate::pipeline::dedupe::dedupe;
use crate::pipeline::normalize::strip_markup;
use crate::pipeline::score::Scorer;
use crate::pipeline::select::select;
use crate::pipeline::summarize::summarize;
use crate::sources::Collector;
use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

/// A query whose collection failed, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub query: String,
    pub reason: String,
}

/// The built section plus what happened while collecting it.
#[derive(Debug, Clone)]
pub struct SectionReport {
    pub section: Section,
    /// Candidates collected across all queries, before admission.
    pub collected: usize,
    pub failures: Vec<QueryFailure>,
}

/// The curation pipeline, configured once and reused for every category.
#[derive(Debug, Clone)]
pub struct Curator {
    classifier: UrlClassifier,
    scorer: Scorer,
    limits: SelectionLimits,
}

impl Curator {
    pub fn new(config: &CurationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            classifier: UrlClassifier::new(&config.exclude_patterns)?,
            scorer: Scorer::new(&config.priority_sources),
            limits: config.limits,
        })
    }

    /// Collect candidates for every query of `category` and curate them.
    ///
    /// Queries run concurrently but their results are merged in query order,
    /// so the section does not depend on which request finishes first. A
    /// failed query contributes nothing; a category where everything failed
    /// yields an empty section.
    #[instrument(level = "info", skip_all, fields(category = %category.id))]
    pub async fn build_section<C: Collector>(
        &self,
        category: &CategorySpec,
        collector: &C,
    ) -> SectionReport {
        let outcomes = join_all(category.queries.iter().map(|q| collector.collect(q))).await;

        let mut pool = Vec::new();
        let mut failures = Vec::new();
        for (query, outcome) in category.queries.iter().zip(outcomes) {
            match outcome {
                Ok(mut results) => {
                    debug!(%query, count = results.len(), "Query collected");
                    pool.append(&mut results);
                }
                Err(e) => {
                    warn!(%query, error = %e, "Query failed; treating as empty");
                    failures.push(QueryFailure {
                        query: query.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let collected = pool.len();
        let section = self.curate(category, pool);
        info!(
            collected,
            failed_queries = failures.len(),
            items = section.items.len(),
            "Built section"
        );
        SectionReport {
            section,
            collected,
            failures,
        }
    }

    /// Curate an already-collected candidate pool into a section.
    pub fn curate(&self, category: &CategorySpec, pool: Vec<RawResult>) -> Section {
        let admitted: Vec<RawResult> = pool
            .into_iter()
            .filter_map(|r| self.admit(r))
            .collect();
        let ranked = self.scorer.rank(dedupe(admitted));
        let picked = select(&ranked, self.limits.max_items, self.limits.min_items);

        let why = why_important(&category.display_name);
        let items = picked
            .into_iter()
            .take(self.limits.section_cap)
            .map(|r| SectionItem {
                summary_lines: summarize(&r.title, &r.snippet).to_vec(),
                why_important: why.to_string(),
                title: r.title,
                source: r.source,
                link: r.link,
            })
            .collect();

        Section {
            id: category.id.clone(),
            display_name: category.display_name.clone(),
            items,
        }
    }

    /// Clean a candidate and check its link; `None` when it is not an article.
    fn admit(&self, raw: RawResult) -> Option<RawResult> {
        let link = raw.link.trim();
        if !self.classifier.is_article_url(link) {
            return None;
        }
        Some(RawResult::new(
            strip_markup(&raw.title),
            link,
            strip_markup(&raw.snippet),
            raw.published_hint,
        ))
    }
}
