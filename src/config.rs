use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Errors raised while loading a [`CrawlerConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("host `{host}` is not an absolute URL: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },
}

/// Configuration for the archive crawler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Site root; yearly archives live at `{host}/{year}/`
    #[serde(default = "default_host")]
    pub host: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Settle time after opening an archive-root page
    #[serde(default = "default_listing_settle_ms")]
    pub listing_settle_ms: u64,

    /// Settle time after opening an article page
    #[serde(default = "default_article_settle_ms")]
    pub article_settle_ms: u64,

    /// Settle time after clicking the next-page control
    #[serde(default = "default_pagination_settle_ms")]
    pub pagination_settle_ms: u64,

    /// Upper bound for the listing-container presence wait
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Optional ceiling on listing pages scanned per year (unbounded when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_listing_pages: Option<NonZeroUsize>,

    /// CSS selectors for the site's markup
    #[serde(default)]
    pub selectors: Selectors,
}

/// CSS selectors used to locate listing and article fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub listing_container: String,
    /// Article entries, searched beneath the listing container
    pub listing_entry: String,
    /// Article link, searched beneath one entry
    pub entry_link: String,
    pub next_page: String,
    pub title: String,
    /// Element carrying the machine-readable `datetime` attribute
    pub published: String,
    pub author: String,
    pub body: String,
    pub cookie_accept: String,
    pub tag_link: String,
    pub tag_groups: Vec<TagGroupSelector>,
}

/// One optional tag group: the `other_data` key it fills and its container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagGroupSelector {
    pub key: String,
    pub container: String,
}

impl TagGroupSelector {
    fn new(key: &str, container: &str) -> Self {
        Self {
            key: key.to_string(),
            container: container.to_string(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            listing_container: ".site-main".to_string(),
            listing_entry: "article".to_string(),
            entry_link: ".entry-content a".to_string(),
            next_page: ".nextpostslink".to_string(),
            title: ".entry-title".to_string(),
            published: ".published".to_string(),
            author: "article > header > div.entry-meta .author".to_string(),
            body: "article > div.entry-content".to_string(),
            cookie_accept: "#onetrust-accept-btn-handler".to_string(),
            tag_link: "a".to_string(),
            tag_groups: vec![
                TagGroupSelector::new("explore_tags", ".tags-links"),
                TagGroupSelector::new("technologies_tags", ".technologies-links"),
                TagGroupSelector::new("countries_tags", ".countries-links"),
            ],
        }
    }
}

/// Default value for host
fn default_host() -> String {
    "https://www.nfcw.com".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_listing_settle_ms() -> u64 {
    2000
}

fn default_article_settle_ms() -> u64 {
    3000
}

fn default_pagination_settle_ms() -> u64 {
    3000
}

fn default_wait_timeout_secs() -> u64 {
    20
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            webdriver_url: default_webdriver_url(),
            listing_settle_ms: default_listing_settle_ms(),
            article_settle_ms: default_article_settle_ms(),
            pagination_settle_ms: default_pagination_settle_ms(),
            wait_timeout_secs: default_wait_timeout_secs(),
            max_listing_pages: None,
            selectors: Selectors::default(),
        }
    }
}

impl CrawlerConfig {
    /// Create a new configuration for the given host with default values
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the host is an absolute URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.host)
            .map(|_| ())
            .map_err(|source| ConfigError::InvalidHost {
                host: self.host.clone(),
                source,
            })
    }

    pub fn listing_settle(&self) -> Duration {
        Duration::from_millis(self.listing_settle_ms)
    }

    pub fn article_settle(&self) -> Duration {
        Duration::from_millis(self.article_settle_ms)
    }

    pub fn pagination_settle(&self) -> Duration {
        Duration::from_millis(self.pagination_settle_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}
