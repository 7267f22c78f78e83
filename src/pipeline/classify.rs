//! Article-likeness classification for candidate URLs.
//!
//! The classifier is an ordered list of [`UrlRule`]s, each paired with a
//! [`Verdict`]. Rules are evaluated left to right and the first rule that
//! matches decides; a URL no rule matches is rejected.
//!
//! | # | Rule | Verdict |
//! |---|------|---------|
//! | 1 | empty or not starting with `http` | reject |
//! | 2 | unparseable, or path is `""` / `"/"` | reject |
//! | 3 | listing pattern (`/topics/`, trailing `/news`, ...) | reject |
//! | 4 | 6+ digit id, `/YYYY/MM/DD`, `/article(s)/` | accept |
//! | 5 | path depth >= 2 | accept |

use crate::config::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static ARTICLE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\d{6,}|/\d{4}/\d{2}/\d{2}|/articles?/").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

#[derive(Debug, Clone)]
pub enum UrlRule {
    /// Empty, or not an http(s) URL.
    NotHttp,
    /// Unparseable, or nothing after the host.
    RootPath,
    /// Regex matched against the lower-cased URL.
    Pattern(Regex),
    /// Path contains at least this many `/` separators.
    MinDepth(usize),
}

impl UrlRule {
    fn matches(&self, url: &str, lower: &str) -> bool {
        match self {
            UrlRule::NotHttp => url.is_empty() || !url.starts_with("http"),
            UrlRule::RootPath => match Url::parse(lower) {
                Ok(parsed) => matches!(parsed.path().trim(), "" | "/"),
                Err(_) => true,
            },
            UrlRule::Pattern(re) => re.is_match(lower),
            UrlRule::MinDepth(depth) => Url::parse(lower)
                .map(|parsed| parsed.path().matches('/').count() >= *depth)
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UrlClassifier {
    rules: Vec<(UrlRule, Verdict)>,
}

impl UrlClassifier {
    /// Build the standard rule list around the given listing-page patterns.
    pub fn new<S: AsRef<str>>(exclude_patterns: &[S]) -> Result<Self, ConfigError> {
        let mut rules = vec![
            (UrlRule::NotHttp, Verdict::Reject),
            (UrlRule::RootPath, Verdict::Reject),
        ];
        for pattern in exclude_patterns {
            let pattern = pattern.as_ref();
            let re = Regex::new(pattern).map_err(|source| ConfigError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
            rules.push((UrlRule::Pattern(re), Verdict::Reject));
        }
        rules.push((UrlRule::Pattern(Regex::clone(&ARTICLE_MARKER)), Verdict::Accept));
        rules.push((UrlRule::MinDepth(2), Verdict::Accept));
        Ok(Self { rules })
    }

    pub fn is_article_url(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        self.rules
            .iter()
            .find(|(rule, _)| rule.matches(url, &lower))
            .map(|(_, verdict)| *verdict == Verdict::Accept)
            .unwrap_or(false)
    }
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EXCLUDE_PATTERNS)
            .expect("built-in listing patterns are valid regexes")
    }
}
