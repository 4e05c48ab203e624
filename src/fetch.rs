//! HTTP transport for list and article pages.
//!
//! The crawler only needs `url -> HTML`, expressed by the [`Fetch`] trait so
//! the driver can be exercised against canned pages. [`HttpClient`] is the
//! real implementation: one `reqwest::Client` built up front and reused for
//! every request of a crawl, sending browser-like headers.

use crate::error::{CrawlError, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Fetch a page and return its body as text.
pub trait Fetch {
    /// GET `url` and return the response body.
    ///
    /// # Errors
    ///
    /// [`CrawlError::Transport`] or [`CrawlError::Status`]; callers treat both
    /// as fatal.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Request settings shared by every fetch of a crawl.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// `User-Agent` header; the site serves degraded pages to unknown clients.
    pub user_agent: String,
    /// `Accept-Language` header.
    pub accept_language: String,
    /// Whole-request timeout. Expiry surfaces as [`CrawlError::Transport`].
    pub timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

/// [`Fetch`] over a single pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build the client with default headers and timeout from `settings`.
    ///
    /// # Errors
    ///
    /// [`CrawlError::Config`] when a header value is not valid ASCII text or
    /// the TLS backend cannot be initialised.
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(USER_AGENT, header_value(&settings.user_agent, "user agent")?);
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value(&settings.accept_language, "accept language")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| CrawlError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| CrawlError::Config(format!("invalid {what}: {e}")))
}

impl Fetch for HttpClient {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let transport = |source| CrawlError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
