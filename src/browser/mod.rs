//! Browser-automation boundary used by the crawl.
//!
//! The crawl only ever navigates, waits for one element, looks elements up,
//! clicks, reads text and attributes, and sleeps. Anything that can do those
//! things can drive it: [`webdriver::WebDriverBrowser`] talks to a real
//! WebDriver server, [`snapshot::SnapshotBrowser`] serves a fixed set of pages
//! from memory.

pub mod snapshot;
pub mod webdriver;

use crate::error::BrowserError;
use std::time::Duration;

pub use snapshot::SnapshotBrowser;
pub use webdriver::WebDriverBrowser;

/// A single browser session, driven strictly sequentially
#[allow(async_fn_in_trait)]
pub trait Browser {
    /// Handle to an element of the current page
    type Element: Clone;

    /// Open `url` in the session
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// URL of the page currently shown
    async fn current_url(&mut self) -> Result<String, BrowserError>;

    /// Wait at most `timeout` for `selector` to match on the current page
    async fn wait_until_present(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Self::Element, BrowserError>;

    /// First element of the page matching `selector`, if any
    async fn find(&mut self, selector: &str) -> Result<Option<Self::Element>, BrowserError>;

    /// Every element of the page matching `selector`, in document order
    async fn find_all(&mut self, selector: &str) -> Result<Vec<Self::Element>, BrowserError>;

    /// First descendant of `scope` matching `selector`, if any
    async fn find_in(
        &mut self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Option<Self::Element>, BrowserError>;

    /// Every descendant of `scope` matching `selector`, in document order
    async fn find_all_in(
        &mut self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Vec<Self::Element>, BrowserError>;

    /// Activate an element the way a script-issued click would
    async fn click(&mut self, element: &Self::Element) -> Result<(), BrowserError>;

    /// Rendered text of an element
    async fn read_text(&mut self, element: &Self::Element) -> Result<String, BrowserError>;

    /// Value of an attribute; `href` is resolved against the page URL
    async fn read_attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, BrowserError>;

    /// Block the crawl for a settle delay
    async fn sleep(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Like [`Browser::find`], but a miss is an error
    async fn require(&mut self, selector: &str) -> Result<Self::Element, BrowserError> {
        self.find(selector)
            .await?
            .ok_or_else(|| BrowserError::NoSuchElement {
                selector: selector.to_string(),
            })
    }
}
