//! CSV output.
//!
//! Columns are `title,url,date`, plus `content` when any record carries
//! article text. Multi-line content stays in one quoted field.

use crate::error::Result;
use crate::models::ArticleRecord;
use crate::outputs::output_filename;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// Render records as CSV bytes, header row first.
///
/// # Arguments
///
/// * `records` - Crawl results in output order
///
/// # Returns
///
/// UTF-8 CSV text. A record without content gets an empty `content` cell
/// when the column is present.
pub fn to_csv(records: &[ArticleRecord]) -> Result<Vec<u8>> {
    let with_content = records.iter().any(|r| r.content.is_some());
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["title", "url", "date"];
    if with_content {
        header.push("content");
    }
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![record.title.as_str(), record.url.as_str(), record.date.as_str()];
        if with_content {
            row.push(record.content.as_deref().unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Write records to `{csv_output_dir}/fortunechina_{local_date}.csv`.
///
/// Creates the directory if needed and returns the written path.
#[instrument(level = "info", skip_all, fields(%csv_output_dir))]
pub async fn write_csv(
    records: &[ArticleRecord],
    csv_output_dir: &str,
    local_date: &str,
) -> Result<PathBuf> {
    let bytes = to_csv(records)?;
    fs::create_dir_all(csv_output_dir).await?;
    let path = PathBuf::from(csv_output_dir).join(output_filename(local_date, "csv"));
    fs::write(&path, bytes).await?;
    info!(path = %path.display(), count = records.len(), "Wrote CSV file");
    Ok(path)
}
