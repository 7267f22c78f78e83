//! Ranking score for candidates.

use crate::models::RawResult;
use std::collections::HashSet;

pub const REPUTABLE_SOURCE_BONUS: i32 = 100;
pub const PUBLISHED_HINT_BONUS: i32 = 10;
pub const LIVE_BLOG_PENALTY: i32 = 5;

/// Scores candidates against a reputable-source allow-list. Higher is better.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    reputable: HashSet<String>,
}

impl Scorer {
    pub fn new<S: AsRef<str>>(reputable_sources: &[S]) -> Self {
        Self {
            reputable: reputable_sources
                .iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn score(&self, item: &RawResult) -> i32 {
        let mut s = 0;
        if self.reputable.contains(&item.source.to_lowercase()) {
            s += REPUTABLE_SOURCE_BONUS;
        }
        if item
            .published_hint
            .as_deref()
            .is_some_and(|hint| !hint.trim().is_empty())
        {
            s += PUBLISHED_HINT_BONUS;
        }
        // live blogs churn and make poor digest entries
        if item.title.to_lowercase().contains("live") {
            s -= LIVE_BLOG_PENALTY;
        }
        s
    }

    /// Stable sort by score, highest first. Ties keep their input order.
    pub fn rank(&self, mut items: Vec<RawResult>) -> Vec<RawResult> {
        items.sort_by_key(|item| std::cmp::Reverse(self.score(item)));
        items
    }
}
