//! Markdown digest of crawl results.
//!
//! ```text
//! # 财富中文网 · 商业 (2025-12-07)
//!
//! ## [Title](https://www.fortunechina.com/shangye/c/...)
//!
//! *2025-12-07*
//!
//! First paragraph
//!
//! Second paragraph
//! ```

use crate::error::Result;
use crate::models::ArticleRecord;
use crate::outputs::output_filename;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

static ORDERED_LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)([.)])").unwrap());

/// Backslash-escape characters that Markdown treats as inline syntax.
pub fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a paragraph so it renders as plain text, including a leading
/// heading, quote, list or rule marker.
pub fn escape_paragraph(text: &str) -> String {
    let escaped = escape_inline(text);
    if escaped.starts_with(['-', '+', '=']) {
        return format!("\\{escaped}");
    }
    ORDERED_LIST_MARKER.replace(&escaped, "$1\\$2").into_owned()
}

/// Percent-encode the characters that would end a Markdown link target early.
fn escape_link_target(url: &str) -> String {
    url.replace('(', "%28").replace(')', "%29").replace(' ', "%20")
}

/// Render records as a Markdown digest.
///
/// # Arguments
///
/// * `records` - Crawl results, rendered in order
/// * `generated_on` - Date shown in the top-level heading
///
/// # Returns
///
/// The digest text. Titles and paragraphs are escaped, so page text cannot
/// inject headings, lists or links.
pub fn records_to_markdown(records: &[ArticleRecord], generated_on: &str) -> String {
    let mut md = String::new();
    writeln!(md, "# 财富中文网 · 商业 ({generated_on})\n").unwrap();

    if records.is_empty() {
        writeln!(md, "_No articles found._").unwrap();
        return md;
    }

    for record in records {
        writeln!(
            md,
            "## [{}]({})\n",
            escape_inline(&record.title),
            escape_link_target(&record.url)
        )
        .unwrap();
        if !record.date.is_empty() {
            writeln!(md, "*{}*\n", record.date).unwrap();
        }
        // One content line per paragraph; blank lines keep them apart in Markdown.
        if let Some(content) = record.content.as_deref().filter(|c| !c.is_empty()) {
            for paragraph in content.lines() {
                writeln!(md, "{}\n", escape_paragraph(paragraph)).unwrap();
            }
        }
    }

    md
}

/// Write the digest to `{markdown_output_dir}/fortunechina_{local_date}.md`.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir))]
pub async fn write_markdown(
    records: &[ArticleRecord],
    markdown_output_dir: &str,
    local_date: &str,
) -> Result<PathBuf> {
    let md = records_to_markdown(records, local_date);
    fs::create_dir_all(markdown_output_dir).await?;
    let path = PathBuf::from(markdown_output_dir).join(output_filename(local_date, "md"));
    fs::write(&path, md).await?;
    info!(path = %path.display(), "Wrote Markdown digest");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, content: Option<&str>) -> ArticleRecord {
        ArticleRecord {
            title: "标题".to_string(),
            url: "https://www.fortunechina.com/shangye/c/a.htm".to_string(),
            date: date.to_string(),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn test_markdown_with_content() {
        let md = records_to_markdown(&[record("2025-12-07", Some("一\n二"))], "2025-12-08");
        assert!(md.starts_with("# 财富中文网 · 商业 (2025-12-08)\n"));
        assert!(md.contains("## [标题](https://www.fortunechina.com/shangye/c/a.htm)\n"));
        assert!(md.contains("*2025-12-07*\n"));
        assert!(md.contains("一\n\n二\n"));
    }

    #[test]
    fn test_markdown_without_date_or_content() {
        let md = records_to_markdown(&[record("", None)], "2025-12-08");
        assert!(!md.contains('*'));
        assert!(md.ends_with("(https://www.fortunechina.com/shangye/c/a.htm)\n\n"));
    }

    #[test]
    fn test_markdown_escapes_title_brackets() {
        let mut record = record("", None);
        record.title = "[独家] 标题*重点*".to_string();
        let md = records_to_markdown(&[record], "2025-12-08");
        assert!(md.contains(r"## [\[独家\] 标题\*重点\*](https://www.fortunechina.com/shangye/c/a.htm)"));
    }

    #[test]
    fn test_markdown_escapes_block_markers_in_content() {
        let md = records_to_markdown(
            &[record("", Some("# 不是标题\n- 不是列表\n1. 不是编号\n普通段落"))],
            "2025-12-08",
        );
        assert!(md.contains("\\# 不是标题\n"));
        assert!(md.contains("\\- 不是列表\n"));
        assert!(md.contains("1\\. 不是编号\n"));
        assert!(md.contains("\n普通段落\n"));
        assert!(!md.contains("\n# 不是标题"));
    }

    #[test]
    fn test_markdown_link_target_parens() {
        let mut record = record("", None);
        record.url = "https://www.fortunechina.com/shangye/c/a(1).htm".to_string();
        let md = records_to_markdown(&[record], "2025-12-08");
        assert!(md.contains("(https://www.fortunechina.com/shangye/c/a%281%29.htm)"));
    }

    #[test]
    fn test_markdown_empty() {
        let md = records_to_markdown(&[], "2025-12-08");
        assert!(md.contains("_No articles found._"));
    }

    #[tokio::test]
    async fn test_write_markdown() {
        let dir = std::env::temp_dir().join(format!(
            "fortune_business_news_md_{}",
            std::process::id()
        ));
        let path = write_markdown(&[record("2025-12-07", None)], dir.to_str().unwrap(), "2025-12-07")
            .await
            .unwrap();
        assert!(path.ends_with("fortunechina_2025-12-07.md"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("*2025-12-07*"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
