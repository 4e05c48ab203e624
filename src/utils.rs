//! Text helpers for extraction and logging, plus output directory checks.
//!
//! The date and whitespace helpers work on plain strings so the extraction
//! rules can be tested without building a DOM.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

use crate::error::Result;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());
static STRICT_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// First `YYYY-MM-DD` substring of `text`, or an empty string.
///
/// The match is purely lexical; `2024-13-45` is returned as found.
pub fn find_date(text: &str) -> String {
    DATE.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Whether `text` is exactly a `YYYY-MM-DD` string.
pub fn is_date(text: &str) -> bool {
    STRICT_DATE.is_match(text)
}

/// Truncate a string for logging purposes.
///
/// Keeps at most `max` characters and appends the number of dropped bytes.
/// Cuts on a character boundary, so CJK text is safe.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<()> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
