//! Curation configuration: categories, reputable sources, listing-page
//! patterns and selection limits.
//!
//! The configuration is immutable data handed to the pipeline explicitly.
//! [`CurationConfig::default`] carries the built-in categories; a YAML file
//! can override any subset of fields:
//!
//! ```yaml
//! priority_sources: [reuters.com, apnews.com]
//! limits:
//!   max_items: 4
//!   min_items: 3
//!   section_cap: 5
//! categories:
//!   - id: ai
//!     name: AI
//!     queries: ["AI model release today"]
//! ```

use crate::models::CategorySpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

/// Domains that receive the reputable-source ranking bonus.
pub const DEFAULT_PRIORITY_SOURCES: &[&str] = &[
    "reuters.com",
    "bloomberg.com",
    "coindesk.com",
    "apnews.com",
    "nikkei.com",
    "ft.com",
    "wsj.com",
    "techcrunch.com",
    "theverge.com",
];

/// Patterns (matched against the lower-cased URL) that mark listing pages.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    r"/categor(y|ies)/",
    r"/topics?/",
    r"/news/?$",
    r"/top/?$",
    r"/home/?$",
    r"/tag/",
    r"/search",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid listing pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
    #[error("invalid selection limits: {0}")]
    Limits(String),
}

/// Size bounds applied when selecting a section's items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionLimits {
    /// Upper bound for the domain-diverse pass.
    pub max_items: usize,
    /// Floor the backfill pass tries to reach.
    pub min_items: usize,
    /// Hard cap on a finished section.
    pub section_cap: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            max_items: 4,
            min_items: 3,
            section_cap: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CurationConfig {
    pub categories: Vec<CategorySpec>,
    pub priority_sources: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub limits: SelectionLimits,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            priority_sources: DEFAULT_PRIORITY_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            limits: SelectionLimits::default(),
        }
    }
}

impl CurationConfig {
    /// Load a configuration from a YAML file. Fields missing from the file
    /// keep their built-in defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path_str.clone(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path_str,
            source,
        })?;
        config.validate()?;
        info!(categories = config.categories.len(), "Loaded curation config");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = self.limits;
        if l.max_items == 0 || l.section_cap == 0 {
            return Err(ConfigError::Limits(
                "max_items and section_cap must be positive".to_string(),
            ));
        }
        if l.min_items > l.max_items {
            return Err(ConfigError::Limits(format!(
                "min_items ({}) exceeds max_items ({})",
                l.min_items, l.max_items
            )));
        }
        Ok(())
    }
}

/// The built-in category set.
pub fn default_categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new(
            "it",
            "IT",
            &[
                "web platform browser release today",
                "software engineering infrastructure open source release",
                "developer tools security update today",
            ],
        ),
        CategorySpec::new(
            "ai",
            "AI",
            &[
                "AI model release today",
                "Reuters AI infrastructure news",
                "generative AI enterprise update today",
            ],
        ),
        CategorySpec::new(
            "crypto",
            "暗号通貨",
            &[
                "CoinDesk Bitcoin Ethereum ETF news today",
                "Bloomberg crypto market news today",
                "crypto regulation SEC news today",
            ],
        ),
        CategorySpec::new(
            "economy",
            "時事・経済ニュース",
            &[
                "Reuters world economy markets today",
                "global markets tariff inflation news today",
                "central bank policy market reaction today",
            ],
        ),
        CategorySpec::new(
            "travel",
            "旅行",
            &[
                "travel news today airline airport hotel tourism",
                "Japan travel policy tourism update today",
                "Reuters travel industry news today",
            ],
        ),
    ]
}

/// The "why it matters" sentence for a category, keyed by display name.
pub fn why_important(display_name: &str) -> &'static str {
    match display_name {
        "IT" => "開発生産性・運用コスト・セキュリティ要件に直結し、実装判断へ影響するため。",
        "AI" => "モデル性能だけでなく、供給網・規制・導入ROIの観点で事業インパクトが大きいため。",
        "暗号通貨" => "マクロ要因と資金フローの影響を受けやすく、短期ボラティリティ管理が重要なため。",
        "時事・経済ニュース" => {
            "金利・為替・関税などの変化が、企業業績と投資判断に広範囲で波及するため。"
        }
        "旅行" => "需要回復・為替・政策変更が、消費行動や移動コストに直接影響するため。",
        _ => "市場と実務の意思決定に影響する可能性があるため。",
    }
}
