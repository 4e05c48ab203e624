//! Site scrapers.
//!
//! Each scraper module owns the site-specific rules for one channel:
//! - how list page URLs are built for a page index
//! - `extract_list(&Html)`: article stubs from a list page
//! - `extract_detail(&Html)`: title, date and body text from an article page
//!
//! Extractors are pure functions of a parsed document. Fetching and pacing
//! live in [`crate::crawl`].
//!
//! | Site | Module | Channel |
//! |------|--------|---------|
//! | Fortune China | [`fortune`] | 商业 (`/shangye/`) |

pub mod fortune;
