//! Digest assembly from finished sections.

use crate::config::CurationConfig;
use crate::models::{Digest, DigestMeta, Headline, Section};
use chrono::{DateTime, Utc};
use itertools::Itertools;

pub const MAX_HIGHLIGHTS: usize = 3;
pub const MAX_HEADLINES: usize = 30;

/// `sourceMode` recorded when no collector was available for the run.
pub const SOURCE_UNAVAILABLE: &str = "unavailable";

/// Assemble the digest for `date`, stamped with the current instant.
pub fn assemble(
    date: &str,
    sections: Vec<Section>,
    config: &CurationConfig,
    source_mode: &str,
) -> Digest {
    assemble_at(date, sections, config, source_mode, Utc::now())
}

pub fn assemble_at(
    date: &str,
    sections: Vec<Section>,
    config: &CurationConfig,
    source_mode: &str,
    generated_at: DateTime<Utc>,
) -> Digest {
    let top_highlights = top_highlights(&sections);
    let headlines = headlines(&sections);
    let item_count = sections.iter().map(|s| s.items.len()).sum();

    Digest {
        date: date.to_string(),
        title: format!("{date} の日次ニュースダイジェスト"),
        summary: digest_summary(config),
        sections,
        top_highlights,
        headlines,
        meta: DigestMeta {
            source_mode: source_mode.to_string(),
            category_count: config.categories.len(),
            item_count,
        },
        generated_at,
    }
}

/// `"<sectionName>：<topItemTitle>"` for each non-empty section, at most three.
fn top_highlights(sections: &[Section]) -> Vec<String> {
    sections
        .iter()
        .filter_map(|s| {
            s.items
                .first()
                .map(|top| format!("{}：{}", s.display_name, top.title))
        })
        .take(MAX_HIGHLIGHTS)
        .collect()
}

fn headlines(sections: &[Section]) -> Vec<Headline> {
    sections
        .iter()
        .flat_map(|s| s.items.iter())
        .take(MAX_HEADLINES)
        .map(|item| Headline {
            title: item.title.clone(),
            source: item.source.clone(),
            link: item.link.clone(),
            snippet: item.summary_lines.iter().take(2).join(" "),
        })
        .collect()
}

fn digest_summary(config: &CurationConfig) -> String {
    let names = config
        .categories
        .iter()
        .map(|c| c.display_name.as_str())
        .join(" / ");
    format!(
        "{}カテゴリ（{}）で当日ニュースを要約。",
        config.categories.len(),
        names
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionItem;
    use chrono::TimeZone;

    fn item(title: &str) -> SectionItem {
        SectionItem {
            title: title.to_string(),
            summary_lines: vec![
                format!("{title} line 1"),
                format!("{title} line 2"),
                format!("{title} line 3"),
            ],
            why_important: "why".to_string(),
            source: "example.com".to_string(),
            link: format!("https://example.com/a/{title}"),
        }
    }

    fn section(name: &str, titles: &[&str]) -> Section {
        Section {
            id: name.to_lowercase(),
            display_name: name.to_string(),
            items: titles.iter().map(|t| item(t)).collect(),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_top_highlights_skip_empty_and_cap() {
        let sections = vec![
            section("IT", &["it1", "it2"]),
            section("AI", &[]),
            section("暗号通貨", &["c1"]),
            section("旅行", &["t1"]),
            section("Extra", &["e1"]),
        ];
        let d = assemble_at("2024-05-01", sections, &CurationConfig::default(), "brave", fixed_time());
        assert_eq!(d.top_highlights, vec!["IT：it1", "暗号通貨：c1", "旅行：t1"]);
    }

    #[test]
    fn test_headlines_flatten_in_order_with_two_lines() {
        let sections = vec![section("IT", &["a", "b"]), section("AI", &["c"])];
        let d = assemble_at("2024-05-01", sections, &CurationConfig::default(), "brave", fixed_time());
        let titles: Vec<&str> = d.headlines.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(d.headlines[0].snippet, "a line 1 a line 2");
    }

    #[test]
    fn test_headlines_capped_at_thirty() {
        let titles: Vec<String> = (0..5).map(|i| format!("t{i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let sections: Vec<Section> = (0..7).map(|i| section(&format!("S{i}"), &refs)).collect();
        let d = assemble_at("2024-05-01", sections, &CurationConfig::default(), "rss", fixed_time());
        assert_eq!(d.headlines.len(), MAX_HEADLINES);
        assert_eq!(d.meta.item_count, 35);
    }

    #[test]
    fn test_meta_and_text_fields() {
        let config = CurationConfig::default();
        let d = assemble_at("2024-05-01", vec![], &config, SOURCE_UNAVAILABLE, fixed_time());
        assert_eq!(d.meta.category_count, 5);
        assert_eq!(d.meta.item_count, 0);
        assert_eq!(d.meta.source_mode, "unavailable");
        assert_eq!(d.title, "2024-05-01 の日次ニュースダイジェスト");
        assert_eq!(
            d.summary,
            "5カテゴリ（IT / AI / 暗号通貨 / 時事・経済ニュース / 旅行）で当日ニュースを要約。"
        );
        assert!(d.top_highlights.is_empty());
        assert!(d.headlines.is_empty());
        assert_eq!(d.generated_at, fixed_time());
    }

    #[test]
    fn test_serialized_field_names() {
        let d = assemble_at("2024-05-01", vec![section("AI", &["x"])], &CurationConfig::default(), "brave", fixed_time());
        let v = serde_json::to_value(&d).unwrap();
        assert!(v.get("top3").is_some());
        assert!(v.get("generatedAt").is_some());
        assert_eq!(v["meta"]["sourceMode"], "brave");
        assert_eq!(v["meta"]["categoryCount"], 5);
        assert_eq!(v["sections"][0]["name"], "AI");
    }
}
