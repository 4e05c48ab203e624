//! Command-line interface definitions.
//!
//! Every option can also be supplied through the environment variable named
//! in its `env` attribute.

use crate::fetch::{DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT, FetchSettings};
use clap::Parser;
use std::time::Duration;

/// Scrape the Fortune China business channel.
///
/// # Examples
///
/// ```sh
/// # First list page only, JSON to stdout
/// fortune_business_news
///
/// # Three pages with full text, written to disk
/// fortune_business_news -p 3 -d -j ./json -m ./markdown -c ./csv
///
/// # Only yesterday's articles
/// TARGET_DATE=2025-12-07 fortune_business_news -d
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Number of list pages to crawl
    #[arg(
        short = 'p',
        long,
        env = "FORTUNE_MAX_PAGE",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_page: u32,

    /// Also fetch each article page for its full text
    #[arg(short = 'd', long, env = "FORTUNE_WITH_DETAIL")]
    pub with_detail: bool,

    /// Output directory for the JSON file (JSON goes to stdout when omitted)
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Output directory for the Markdown digest
    #[arg(short, long)]
    pub markdown_output_dir: Option<String>,

    /// Output directory for the CSV file
    #[arg(short, long)]
    pub csv_output_dir: Option<String>,

    /// Keep only articles dated YYYY-MM-DD
    #[arg(long, env = "TARGET_DATE")]
    pub target_date: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long, env = "FORTUNE_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Accept-Language header sent with every request
    #[arg(long, env = "FORTUNE_ACCEPT_LANGUAGE", default_value = DEFAULT_ACCEPT_LANGUAGE)]
    pub accept_language: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "FORTUNE_TIMEOUT_SECS", default_value_t = 20)]
    pub timeout_secs: u64,

    /// Pause after each article request, in milliseconds
    #[arg(long, env = "FORTUNE_DELAY_MS", default_value_t = 1000)]
    pub delay_ms: u64,
}

impl Cli {
    /// Transport settings taken from the header and timeout options.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            user_agent: self.user_agent.clone(),
            accept_language: self.accept_language.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Politeness delay applied after each article request.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["fortune_business_news"]);

        assert_eq!(cli.max_page, 1);
        assert!(!cli.with_detail);
        assert!(cli.json_output_dir.is_none());
        assert_eq!(cli.accept_language, "zh-CN,zh;q=0.9");
        assert_eq!(cli.delay(), Duration::from_secs(1));
        assert_eq!(cli.fetch_settings().timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "fortune_business_news",
            "-p",
            "3",
            "-d",
            "-j",
            "/tmp/json",
            "-m",
            "/tmp/markdown",
            "-c",
            "/tmp/csv",
        ]);

        assert_eq!(cli.max_page, 3);
        assert!(cli.with_detail);
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
        assert_eq!(cli.markdown_output_dir.as_deref(), Some("/tmp/markdown"));
        assert_eq!(cli.csv_output_dir.as_deref(), Some("/tmp/csv"));
    }

    #[test]
    fn test_cli_rejects_zero_pages() {
        let result = Cli::try_parse_from(["fortune_business_news", "--max-page", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_fetch_settings() {
        let cli = Cli::parse_from([
            "fortune_business_news",
            "--user-agent",
            "test-agent",
            "--timeout-secs",
            "5",
            "--delay-ms",
            "0",
        ]);

        let settings = cli.fetch_settings();
        assert_eq!(settings.user_agent, "test-agent");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(cli.delay(), Duration::ZERO);
    }
}
