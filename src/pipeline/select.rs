//! Domain-diversified selection over a ranked pool.
//!
//! The first pass walks the pool in rank order and admits at most one item
//! per source domain, stopping at `max_items`. When that leaves fewer than
//! `min_items`, a backfill pass admits the remaining items in pool order,
//! ignoring repeated domains, until `min_items` is reached. Backfilled items
//! are appended after the diverse picks.
//!
//! Items whose normalized source is empty (unparseable link) are exempt from
//! the diversity rule: they never collide with each other.

use crate::models::RawResult;
use std::collections::HashSet;

/// Pick a bounded, domain-diverse subset of `pool`.
///
/// Diversity picks come first in rank order, followed by any backfilled
/// items in pool order.
///
/// Never returns more than `max_items` and never returns items that are not
/// in `pool`. A pool smaller than `min_items` is returned whole.
pub fn select(pool: &[RawResult], max_items: usize, min_items: usize) -> Vec<RawResult> {
    let mut admitted: Vec<usize> = Vec::new();
    let mut used_sources: HashSet<&str> = HashSet::new();

    for (idx, item) in pool.iter().enumerate() {
        if admitted.len() >= max_items {
            break;
        }
        let source = item.source.as_str();
        if !source.is_empty() && !used_sources.insert(source) {
            continue;
        }
        admitted.push(idx);
    }

    let floor = min_items.min(max_items);
    if admitted.len() < floor {
        let taken: HashSet<usize> = admitted.iter().copied().collect();
        for idx in (0..pool.len()).filter(|idx| !taken.contains(idx)) {
            if admitted.len() >= floor {
                break;
            }
            admitted.push(idx);
        }
    }

    admitted.into_iter().map(|idx| pool[idx].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, link: &str) -> RawResult {
        RawResult::new(title, link, "", None)
    }

    fn same_domain_pool(n: usize) -> Vec<RawResult> {
        (0..n)
            .map(|i| item(&format!("Story {i}"), &format!("https://mono.example/a/{i}")))
            .collect()
    }

    #[test]
    fn test_single_domain_pool_backfills_to_min() {
        let out = select(&same_domain_pool(10), 4, 3);
        assert_eq!(out.len(), 3);
        let titles: Vec<&str> = out.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Story 0", "Story 1", "Story 2"]);
    }

    #[test]
    fn test_diverse_pool_stops_at_max() {
        let pool: Vec<RawResult> = (0..8)
            .map(|i| item(&format!("S{i}"), &format!("https://site{i}.example/a/b")))
            .collect();
        let out = select(&pool, 4, 3);
        assert_eq!(out.len(), 4);
        assert_eq!(out[3].title, "S3");
    }

    #[test]
    fn test_one_item_per_domain_when_enough_diversity() {
        let pool = vec![
            item("A1", "https://a.example/x/1"),
            item("A2", "https://a.example/x/2"),
            item("B1", "https://b.example/x/1"),
            item("C1", "https://c.example/x/1"),
            item("B2", "https://b.example/x/2"),
        ];
        let out = select(&pool, 4, 3);
        let titles: Vec<&str> = out.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A1", "B1", "C1"]);
    }

    #[test]
    fn test_backfill_appends_after_diverse_picks() {
        let pool = vec![
            item("A1", "https://a.example/x/1"),
            item("A2", "https://a.example/x/2"),
            item("B1", "https://b.example/x/1"),
            item("A3", "https://a.example/x/3"),
        ];
        let out = select(&pool, 4, 3);
        let titles: Vec<&str> = out.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A1", "B1", "A2"]);
    }

    #[test]
    fn test_small_pool_returned_whole() {
        let out = select(&same_domain_pool(2), 4, 3);
        assert_eq!(out.len(), 2);
        assert!(select(&[], 4, 3).is_empty());
    }

    #[test]
    fn test_empty_sources_are_exempt_from_diversity() {
        let pool = vec![
            item("Bad 1", "not a url"),
            item("Bad 2", "also not a url"),
            item("Bad 3", "still not a url"),
            item("Good", "https://a.example/x/1"),
        ];
        let out = select(&pool, 4, 3);
        assert_eq!(out.len(), 4);
        assert!(out.iter().filter(|r| r.source.is_empty()).count() == 3);
    }

    #[test]
    fn test_never_exceeds_max_or_fabricates() {
        let pool = same_domain_pool(6);
        for max in 0..6 {
            for min in 0..6 {
                let out = select(&pool, max, min);
                assert!(out.len() <= max);
                assert!(out.iter().all(|r| pool.contains(r)));
            }
        }
    }
}
