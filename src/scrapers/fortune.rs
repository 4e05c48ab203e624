//! Fortune China (财富中文网) business channel scraper.
//!
//! # URL Pattern
//!
//! The first list page is `https://www.fortunechina.com/shangye/`, later pages
//! are `https://www.fortunechina.com/shangye/node_12143_{N}.htm`. Article links
//! look like `/shangye/c/2025-12/03/content_123456.htm`; any link without the
//! `/shangye/c/` marker is navigation or advertising and is skipped.

use crate::error::Result;
use crate::models::{ArticleDetail, ArticleStub};
use crate::utils::{collapse_whitespace, find_date};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

pub const BASE: &str = "https://www.fortunechina.com";
pub const ARTICLE_PATH_MARKER: &str = "/shangye/c/";
const FIRST_PAGE_PATH: &str = "/shangye/";

/// Elements whose text is never rendered.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

static BASE_URL: Lazy<Url> = Lazy::new(|| Url::parse(BASE).expect("static base URL"));

static LIST_HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static PRIMARY_HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static SECONDARY_HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[class], article[class], section[class], main[class]").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static CONTENT_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)content|article").unwrap());

/// URL of list page `page` (1-based).
pub fn page_url(page: u32) -> String {
    if page <= 1 {
        format!("{BASE}{FIRST_PAGE_PATH}")
    } else {
        format!("{BASE}/shangye/node_12143_{page}.htm")
    }
}

/// Whether `href` points at a business channel article.
pub fn is_article_href(href: &str) -> bool {
    href.contains(ARTICLE_PATH_MARKER)
}

/// Resolve `href` against the site origin.
///
/// # Errors
///
/// Returns [`CrawlError::InvalidUrl`](crate::error::CrawlError::InvalidUrl)
/// when `href` cannot be joined onto the origin.
pub fn resolve(href: &str) -> Result<String> {
    Ok(BASE_URL.join(href)?.into())
}

/// Extract article stubs from a list page, in document order.
///
/// Every `<h2>` is inspected; its first link with a non-empty `href` must
/// contain [`ARTICLE_PATH_MARKER`]. The date is the first `YYYY-MM-DD` in the
/// text of the heading's parent block. Duplicates are kept.
#[instrument(level = "debug", skip_all)]
pub fn extract_list(document: &Html) -> Vec<ArticleStub> {
    let stubs: Vec<ArticleStub> = document
        .select(&LIST_HEADING)
        .filter_map(|heading| {
            let link = first_link(heading)?;
            let href = link.value().attr("href")?.trim();
            if !is_article_href(href) {
                return None;
            }
            let url = match resolve(href) {
                Ok(url) => url,
                Err(e) => {
                    debug!(%href, error = %e, "Skipping unresolvable article link");
                    return None;
                }
            };
            let block = heading
                .parent()
                .and_then(ElementRef::wrap)
                .unwrap_or(heading);
            Some(ArticleStub {
                title: text_of(link).trim().to_string(),
                url,
                date: find_date(&visible_text(block)),
            })
        })
        .collect();

    debug!(count = stubs.len(), "Extracted list stubs");
    stubs
}

/// Extract title, date and content from an article page.
///
/// - title: first `<h1>`, else first `<h2>`, else empty
/// - content: non-empty `<p>` texts inside the first `div`/`article`/`section`/`main`
///   whose class matches `content` or `article` (any case), joined with `\n`;
///   without such a container the whole document is used
/// - date: first `YYYY-MM-DD` anywhere in the document text, since bylines
///   usually sit outside the body container
#[instrument(level = "debug", skip_all)]
pub fn extract_detail(document: &Html) -> ArticleDetail {
    let root = document.root_element();

    let title = root
        .select(&PRIMARY_HEADING)
        .next()
        .or_else(|| root.select(&SECONDARY_HEADING).next())
        .map(|h| text_of(h).trim().to_string())
        .unwrap_or_default();

    let container = content_container(document).unwrap_or_else(|| {
        debug!("No content container found; using whole document");
        root
    });

    let content = container
        .select(&PARAGRAPH)
        .map(|p| text_of(p).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    ArticleDetail {
        title,
        date: find_date(&visible_text(root)),
        content,
    }
}

fn content_container(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&CONTAINER).find(|el| {
        el.value()
            .attr("class")
            .is_some_and(|class| CONTENT_CLASS.is_match(class))
    })
}

fn first_link(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    heading.select(&LINK).find(|a| {
        a.value()
            .attr("href")
            .is_some_and(|href| !href.trim().is_empty())
    })
}

/// Text nodes under `el`, skipping anything inside [`HIDDEN_ELEMENTS`].
fn visible_strings<'a>(el: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    el.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| HIDDEN_ELEMENTS.iter().any(|name| *name == e.name()))
        });
        (!hidden).then_some(&**text)
    })
}

fn text_of(el: ElementRef<'_>) -> String {
    visible_strings(el).collect()
}

/// Visible text nodes joined by spaces with whitespace runs collapsed.
fn visible_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&visible_strings(el).collect::<Vec<_>>().join(" "))
}
