//! Crawl driver: list pages first, then optionally each article page.
//!
//! Pages are visited in order `1..=max_page` and every stub of a page is
//! handled before the next page is fetched. With detail fetching on, the
//! [`Pacer`] runs after every article request. The first failed fetch aborts
//! the crawl and nothing collected so far is returned.

use crate::error::{CrawlError, Result};
use crate::fetch::Fetch;
use crate::models::{ArticleRecord, ArticleStub};
use crate::scrapers::fortune;
use futures::stream::{self, StreamExt, TryStreamExt};
use scraper::Html;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Politeness policy invoked between article requests.
pub trait Pacer {
    async fn pause(&self);
}

/// Sleep for a fixed interval. `FixedDelay(Duration::ZERO)` disables pacing.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        FixedDelay(Duration::from_secs(1))
    }
}

impl Pacer for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// Sequential crawler over the business channel.
///
/// Owns the transport and the pacing policy for the whole crawl, so every
/// request shares one client and its headers.
///
/// # Examples
///
/// ```ignore
/// let client = HttpClient::new(&FetchSettings::default())?;
/// let crawler = Crawler::new(client, FixedDelay::default());
/// let records = crawler.crawl(2, true).await?;
/// ```
pub struct Crawler<F, P> {
    /// Transport used for list and article pages.
    fetcher: F,
    /// Invoked after every article request.
    pacer: P,
}

impl<F: Fetch, P: Pacer> Crawler<F, P> {
    /// Create a crawler from a transport and a pacing policy.
    pub fn new(fetcher: F, pacer: P) -> Self {
        Self { fetcher, pacer }
    }

    /// Crawl list pages `1..=max_page`, returning records in page order then
    /// list order. `content` is set only when `with_detail` is true.
    ///
    /// # Errors
    ///
    /// - [`CrawlError::Config`] when `max_page` is 0
    /// - the first fetch failure, unchanged; records gathered before it are dropped
    #[instrument(level = "info", skip(self))]
    pub async fn crawl(&self, max_page: u32, with_detail: bool) -> Result<Vec<ArticleRecord>> {
        if max_page == 0 {
            return Err(CrawlError::Config("max_page must be at least 1".to_string()));
        }

        let mut records = Vec::new();
        for page in 1..=max_page {
            let stubs = self.list_page(page).await?;
            if with_detail {
                let enriched: Vec<ArticleRecord> = stream::iter(stubs)
                    .then(|stub| self.enrich(stub))
                    .try_collect()
                    .await?;
                records.extend(enriched);
            } else {
                records.extend(stubs.into_iter().map(ArticleRecord::from));
            }
        }

        info!(count = records.len(), "Crawl complete");
        Ok(records)
    }

    /// Fetch one list page and extract its stubs.
    async fn list_page(&self, page: u32) -> Result<Vec<ArticleStub>> {
        let url = fortune::page_url(page);
        let html = self.fetcher.fetch(&url).await?;
        let stubs = fortune::extract_list(&Html::parse_document(&html));
        info!(page, %url, count = stubs.len(), "Indexed list page");
        Ok(stubs)
    }

    async fn enrich(&self, stub: ArticleStub) -> Result<ArticleRecord> {
        let html = self.fetcher.fetch(&stub.url).await?;
        let detail = fortune::extract_detail(&Html::parse_document(&html));
        debug!(url = %stub.url, title = %detail.title, bytes = detail.content.len(), "Parsed article");
        self.pacer.pause().await;
        Ok(ArticleRecord::merge(stub, detail))
    }
}
