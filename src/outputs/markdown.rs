//! Markdown rendering of a digest.
//!
//! The layout mirrors the calendar viewer: title, summary, the top
//! highlights, then one block per section with linked items, their summary
//! lines and why each matters.

use crate::models::Digest;
use std::error::Error;
use std::fmt::Write;
use tokio::fs;
use tracing::{info, instrument};

pub fn digest_to_markdown(digest: &Digest) -> String {
    let mut md = String::new();

    // writing into a String cannot fail
    let _ = writeln!(md, "# {}\n", digest.title);
    if !digest.summary.is_empty() {
        let _ = writeln!(md, "{}\n", digest.summary);
    }

    if !digest.top_highlights.is_empty() {
        let _ = writeln!(md, "## 今日の注目3点\n");
        for h in &digest.top_highlights {
            let _ = writeln!(md, "- {h}");
        }
        md.push('\n');
    }

    for section in &digest.sections {
        let _ = writeln!(md, "## ■ {}\n", section.display_name);
        if section.items.is_empty() {
            let _ = writeln!(md, "_項目なし_\n");
            continue;
        }
        for item in &section.items {
            let title = escape_brackets(&item.title);
            if item.link.starts_with("http://") || item.link.starts_with("https://") {
                let _ = write!(md, "- [{}]({})", title, item.link);
            } else {
                let _ = write!(md, "- {title}");
            }
            if !item.source.is_empty() {
                let _ = write!(md, " <small>`{}`</small>", item.source);
            }
            md.push('\n');
            for line in &item.summary_lines {
                let _ = writeln!(md, "    - {line}");
            }
            let _ = writeln!(md, "    - **なぜ重要か:** {}", item.why_important);
        }
        md.push('\n');
    }

    // older digests may carry only a flat headline list
    if digest.sections.is_empty() && !digest.headlines.is_empty() {
        let _ = writeln!(md, "## 主なトピック\n");
        for h in &digest.headlines {
            let title = if h.title.is_empty() {
                "untitled".to_string()
            } else {
                escape_brackets(&h.title)
            };
            if h.link.starts_with("http://") || h.link.starts_with("https://") {
                let _ = write!(md, "- [{}]({})", title, h.link);
            } else {
                let _ = write!(md, "- {title}");
            }
            if !h.source.is_empty() {
                let _ = write!(md, " <small>({})</small>", h.source);
            }
            md.push('\n');
        }
        md.push('\n');
    }

    let _ = writeln!(
        md,
        "<small>mode: {} / items: {} / generated: {}</small>",
        digest.meta.source_mode,
        digest.meta.item_count,
        digest.generated_at.to_rfc3339()
    );
    md
}

fn escape_brackets(s: &str) -> String {
    s.replace('[', "\\[").replace(']', "\\]")
}

/// Render and write `{markdown_output_dir}/{date}.md`.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir, date = %digest.date))]
pub async fn write_markdown(
    digest: &Digest,
    markdown_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    fs::create_dir_all(markdown_output_dir).await?;
    let path = format!(
        "{}/{}.md",
        markdown_output_dir.trim_end_matches('/'),
        digest.date
    );
    fs::write(&path, digest_to_markdown(digest)).await?;
    info!(%path, "Wrote digest Markdown");
    Ok(path)
}
