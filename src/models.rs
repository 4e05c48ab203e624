//! Data models for scraped articles.
//!
//! - [`ArticleStub`]: what a list page tells us about an article
//! - [`ArticleDetail`]: what the article page itself tells us
//! - [`ArticleRecord`]: the crawl's output unit, a stub optionally enriched
//!   with detail data
//!
//! All three are transient values built during a single crawl.

use serde::{Deserialize, Serialize};

/// An article as listed on a channel list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleStub {
    /// Link text, whitespace-trimmed.
    pub title: String,
    /// Absolute article URL.
    pub url: String,
    /// First `YYYY-MM-DD` found near the link, or empty.
    pub date: String,
}

/// Fields recovered from an article page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ArticleDetail {
    pub title: String,
    pub date: String,
    /// Non-empty paragraphs joined with `\n`.
    pub content: String,
}

/// One output record.
///
/// `content` is `None` when detail fetching was disabled and is then omitted
/// from the serialized form entirely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl From<ArticleStub> for ArticleRecord {
    fn from(stub: ArticleStub) -> Self {
        ArticleRecord {
            title: stub.title,
            url: stub.url,
            date: stub.date,
            content: None,
        }
    }
}

impl ArticleRecord {
    /// Merge a stub with the detail fetched from its URL.
    ///
    /// The stub's title and url are kept as-is. A non-empty stub date always
    /// wins; the detail date only fills an empty one.
    pub fn merge(stub: ArticleStub, detail: ArticleDetail) -> Self {
        let date = if stub.date.is_empty() {
            detail.date
        } else {
            stub.date
        };
        ArticleRecord {
            title: stub.title,
            url: stub.url,
            date,
            content: Some(detail.content),
        }
    }
}

/// Keep only records published on `date` (`YYYY-MM-DD`), preserving order.
pub fn filter_by_date(records: Vec<ArticleRecord>, date: &str) -> Vec<ArticleRecord> {
    records.into_iter().filter(|r| r.date == date).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(date: &str) -> ArticleStub {
        ArticleStub {
            title: "Stub title".to_string(),
            url: "https://www.fortunechina.com/shangye/c/2024-01/01/content_1.htm".to_string(),
            date: date.to_string(),
        }
    }

    fn detail(date: &str) -> ArticleDetail {
        ArticleDetail {
            title: "Detail title".to_string(),
            date: date.to_string(),
            content: "First paragraph\nSecond paragraph".to_string(),
        }
    }

    #[test]
    fn test_merge_keeps_known_stub_date() {
        let record = ArticleRecord::merge(stub("2024-01-01"), detail("2024-02-02"));
        assert_eq!(record.date, "2024-01-01");
    }

    #[test]
    fn test_merge_fills_empty_stub_date() {
        let record = ArticleRecord::merge(stub(""), detail("2024-02-02"));
        assert_eq!(record.date, "2024-02-02");
    }

    #[test]
    fn test_merge_keeps_stub_title_and_url() {
        let record = ArticleRecord::merge(stub(""), detail(""));
        assert_eq!(record.title, "Stub title");
        assert!(record.url.ends_with("content_1.htm"));
        assert_eq!(record.date, "");
        assert_eq!(
            record.content.as_deref(),
            Some("First paragraph\nSecond paragraph")
        );
    }

    #[test]
    fn test_record_from_stub_has_no_content_key() {
        let record = ArticleRecord::from(stub("2024-01-01"));
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("content"));
        assert!(json.contains("\"date\":\"2024-01-01\""));
    }

    #[test]
    fn test_record_with_empty_content_keeps_key() {
        let mut detail = detail("");
        detail.content.clear();
        let record = ArticleRecord::merge(stub("2024-01-01"), detail);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"content\":\"\""));
    }

    #[test]
    fn test_record_deserializes_without_content() {
        let json = r#"{"title":"T","url":"https://www.fortunechina.com/shangye/c/x.htm","date":""}"#;
        let record: ArticleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.content, None);
    }

    #[test]
    fn test_filter_by_date() {
        let records = vec![
            ArticleRecord::from(stub("2024-01-01")),
            ArticleRecord::from(stub("")),
            ArticleRecord::from(stub("2024-01-02")),
            ArticleRecord::from(stub("2024-01-01")),
        ];
        let kept = filter_by_date(records, "2024-01-01");
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.date == "2024-01-01"));
    }
}
