//! Crawler for the NFCW news archive.
//!
//! The archive is walked one calendar year at a time, newest first. Each
//! year's listing pages are followed through their "next page" control, and
//! every linked article becomes a [`Document`]. The crawl ends at the last
//! document known from a previous run, at a maximum count, or when a year's
//! listing cannot be read.
//!
//! The host owns the browser session and receives the documents:
//!
//! ```no_run
//! use nfcw_crawler::{ArchiveCrawler, CrawlerConfig, WebDriverBrowser};
//!
//! # async fn run() -> Result<(), nfcw_crawler::BrowserError> {
//! let browser = WebDriverBrowser::connect("http://localhost:4444").await?;
//! let mut crawler = ArchiveCrawler::new(browser, CrawlerConfig::default(), Some(50), None);
//! let documents = crawler.content().await;
//! crawler.into_browser().close().await?;
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use browser::{Browser, SnapshotBrowser, WebDriverBrowser};
pub use config::CrawlerConfig;
pub use crawlers::{ArchiveCrawler, CrawlReport, StopReason};
pub use error::{BrowserError, CrawlError};
pub use results::{Document, OtherValue, Tag};

/// Name of the crawled source, also the log target of its crawls
pub const SOURCE_NAME: &str = "nfcw";

/// Options for a one-shot crawl through a WebDriver server
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    pub max_count_documents: Option<usize>,
    pub last_document: Option<Document>,
    pub start_year: Option<i32>,
}

/// Connect to WebDriver, crawl, and close the session
///
/// The `WEBDRIVER_URL` environment variable, when set, takes precedence over
/// the configured WebDriver URL.
pub async fn crawl_with_webdriver(
    mut config: CrawlerConfig,
    options: CrawlOptions,
) -> Result<CrawlReport, BrowserError> {
    if let Some(webdriver_url) = webdriver_override(std::env::var("WEBDRIVER_URL").ok()) {
        config.webdriver_url = webdriver_url;
    }

    let browser = WebDriverBrowser::connect(&config.webdriver_url).await?;
    let mut crawler = ArchiveCrawler::new(
        browser,
        config,
        options.max_count_documents,
        options.last_document.as_ref(),
    );
    if let Some(year) = options.start_year {
        crawler = crawler.with_start_year(year);
    }

    let report = crawler.crawl().await;

    if let Err(e) = crawler.into_browser().close().await {
        ::log::warn!("Failed to close WebDriver session: {}", e);
    }
    Ok(report)
}

/// A set, non-empty `WEBDRIVER_URL` value
fn webdriver_override(value: Option<String>) -> Option<String> {
    value.filter(|url| !url.is_empty())
}
