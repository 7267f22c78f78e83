//! Domain canonicalization and text cleanup.
//!
//! None of these functions fail: malformed input degrades to an empty string.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Lower-cased host of `url` with a leading `www.` stripped.
///
/// Returns an empty string if the URL does not parse or has no host.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_domain("https://www.Reuters.com/x"), "reuters.com");
/// assert_eq!(normalize_domain("garbage"), "");
/// ```
pub fn normalize_domain(url: &str) -> String {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

/// Remove angle-bracket tags and trim surrounding whitespace.
pub fn strip_markup(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").trim().to_string()
}

/// Collapse every run of whitespace to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
