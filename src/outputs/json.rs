//! JSON output.
//!
//! Records are written as one pretty-printed array. The `content` key is
//! present only when the crawl fetched article pages.

use crate::error::Result;
use crate::models::ArticleRecord;
use crate::outputs::output_filename;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Render records as a pretty-printed JSON array.
pub fn to_json(records: &[ArticleRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write records to `{json_output_dir}/fortunechina_{local_date}.json`.
///
/// Creates the directory if needed and returns the written path.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_records(
    records: &[ArticleRecord],
    json_output_dir: &str,
    local_date: &str,
) -> Result<PathBuf> {
    let json = to_json(records)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = PathBuf::from(json_output_dir).join(output_filename(local_date, "json"));
    fs::write(&path, json).await?;
    info!(path = %path.display(), count = records.len(), "Wrote JSON file");

    Ok(path)
}
