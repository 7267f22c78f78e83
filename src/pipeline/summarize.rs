//! Fixed-shape, three-line blurbs for curated items.
//!
//! The summarizer is deterministic and does no I/O: the same title and
//! snippet always produce the same three lines.

use crate::pipeline::normalize::collapse_whitespace;

/// Character budget for the snippet preview on line 2.
pub const PREVIEW_CHARS: usize = 85;

pub const GENERIC_TOPIC: &str = "このニュース";
pub const PREVIEW_LABEL: &str = "概要: ";
pub const NO_PREVIEW_LINE: &str = "概要: 速報性の高い話題で、詳細はリンク先で確認できます。";
pub const CLOSING_LINE: &str = "背景や今後の影響を把握するため、継続ウォッチが有効です。";

/// Build the three summary lines for an item.
///
/// 1. A templated sentence naming the topic (the title, or a generic
///    placeholder when the title is blank).
/// 2. A truncated snippet preview, or a fixed fallback when there is none.
/// 3. A fixed closing sentence.
pub fn summarize(title: &str, snippet: &str) -> [String; 3] {
    let topic = match title.trim() {
        "" => GENERIC_TOPIC,
        t => t,
    };
    let line1 = format!("{topic}に関する最新動向です。");

    let text = collapse_whitespace(snippet);
    let line2 = if text.is_empty() {
        NO_PREVIEW_LINE.to_string()
    } else {
        format!("{PREVIEW_LABEL}{}", preview(&text))
    };

    [line1, line2, CLOSING_LINE.to_string()]
}

/// First [`PREVIEW_CHARS`] characters of `text`, with trailing separators
/// trimmed and an ellipsis appended when anything was cut.
fn preview(text: &str) -> String {
    let truncated = text.chars().count() > PREVIEW_CHARS;
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    let mut short = head.trim_end_matches([' ', ',', ';']).to_string();
    if truncated {
        short.push('…');
    }
    short
}
