//! First-seen deduplication by title and link.

use crate::models::RawResult;
use std::collections::HashSet;

/// Drop repeated candidates, preserving first-seen order.
///
/// Title and link are trimmed before comparison. An item is dropped when
/// either is empty, when its lower-cased title was already seen, or when its
/// exact link was already seen.
pub fn dedupe(items: Vec<RawResult>) -> Vec<RawResult> {
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut seen_links: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(items.len());

    for item in items {
        let title = item.title.trim();
        let link = item.link.trim();
        if title.is_empty() || link.is_empty() {
            continue;
        }
        let title_key = title.to_lowercase();
        if seen_titles.contains(&title_key) || seen_links.contains(link) {
            continue;
        }
        seen_titles.insert(title_key);
        seen_links.insert(link.to_string());
        out.push(item);
    }

    out
}
