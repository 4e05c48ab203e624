//! # Fortune Business News
//!
//! Scrapes the business channel (商业) of [Fortune China](https://www.fortunechina.com)
//! and emits structured article records.
//!
//! ## Usage
//!
//! ```sh
//! fortune_business_news -p 2 -d -j ./json -m ./markdown -c ./csv
//! ```
//!
//! ## Architecture
//!
//! 1. **Indexing**: fetch list pages `1..=max_page` and extract article stubs
//! 2. **Detail** (optional): fetch each article page for its date and full text,
//!    pausing after every request
//! 3. **Output**: JSON to stdout or a file, plus optional Markdown and CSV files
//!
//! Everything runs sequentially over a single HTTP client. The first failed
//! request aborts the run.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod crawl;
mod error;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use crawl::{Crawler, FixedDelay};
use error::CrawlError;
use fetch::HttpClient;
use models::filter_by_date;
use outputs::{json, markdown};
use utils::{ensure_writable_dir, is_date, truncate_for_log};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("fortune_business_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if let Some(date) = args.target_date.as_deref() {
        if !is_date(date) {
            return Err(CrawlError::Config(format!("target date {date:?} is not YYYY-MM-DD")).into());
        }
    }

    // Fail before crawling if outputs cannot be written
    let output_dirs = [
        &args.json_output_dir,
        &args.markdown_output_dir,
        &args.csv_output_dir,
    ];
    for dir in output_dirs.into_iter().flatten() {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable");
            return Err(e.into());
        }
    }

    let client = HttpClient::new(&args.fetch_settings())?;
    let crawler = Crawler::new(client, FixedDelay(args.delay()));

    let mut records = match crawler.crawl(args.max_page, args.with_detail).await {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, transport = e.is_transport(), "Crawl aborted");
            return Err(e.into());
        }
    };

    for (i, record) in records.iter().enumerate() {
        debug!(
            index = i,
            title = %record.title,
            date = %record.date,
            content = %truncate_for_log(record.content.as_deref().unwrap_or_default(), 100),
            "Record"
        );
    }

    if let Some(date) = args.target_date.as_deref() {
        let before = records.len();
        records = filter_by_date(records, date);
        info!(target_date = %date, before, after = records.len(), "Filtered records by date");
    }

    let local_date = Local::now().date_naive().to_string();

    match args.json_output_dir.as_deref() {
        Some(dir) => {
            json::write_records(&records, dir, &local_date).await?;
        }
        None => println!("{}", json::to_json(&records)?),
    }

    if let Some(dir) = args.markdown_output_dir.as_deref() {
        markdown::write_markdown(&records, dir, &local_date).await?;
    }

    if let Some(dir) = args.csv_output_dir.as_deref() {
        outputs::csv::write_csv(&records, dir, &local_date).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        records = records.len(),
        "Execution complete"
    );

    Ok(())
}
