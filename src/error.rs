use std::time::Duration;

/// Failures reported by a [`Browser`](crate::browser::Browser) implementation
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    /// A lookup that must match found nothing
    #[error("no element matches `{selector}`")]
    NoSuchElement { selector: String },

    /// An element did not show up within the allowed wait
    #[error("`{selector}` not present after {timeout:?}")]
    Timeout { selector: String, timeout: Duration },

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The page could not be opened
    #[error("failed to open {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("webdriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("webdriver session could not be created: {0}")]
    NewSession(#[from] fantoccini::error::NewSessionError),

    #[error("script argument could not be encoded: {0}")]
    Script(#[from] serde_json::Error),
}

/// Failures raised inside one crawl
///
/// None of these escape [`ArchiveCrawler::content`](crate::crawlers::archive::ArchiveCrawler::content);
/// they end up either in the log or as the fatal stop reason of a [`CrawlReport`](crate::crawlers::archive::CrawlReport).
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("failed to navigate to {url}")]
    Navigation {
        url: String,
        #[source]
        source: BrowserError,
    },

    #[error("listing container `{selector}` not found on {url}")]
    ListingNotFound {
        url: String,
        selector: String,
        #[source]
        source: BrowserError,
    },

    #[error("required field `{field}` unreadable on {url}")]
    RequiredField {
        url: String,
        field: &'static str,
        #[source]
        source: BrowserError,
    },

    #[error("required field `{field}` is empty on {url}")]
    EmptyField { url: String, field: &'static str },

    #[error("publication date `{value}` on {url} is not a valid timestamp")]
    InvalidDate {
        url: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
