//! Error taxonomy for the crawler.
//!
//! Only fetch failures ([`CrawlError::Transport`] and [`CrawlError::Status`])
//! can abort a crawl. Fields that cannot be located in a page are never errors;
//! the extractors return empty strings for them instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// Network failure, timeout, or an unreadable response body.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CrawlError {
    /// True for the fetch failures that abort a crawl.
    pub fn is_transport(&self) -> bool {
        matches!(self, CrawlError::Transport { .. } | CrawlError::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
