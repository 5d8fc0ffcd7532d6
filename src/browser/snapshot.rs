use crate::browser::Browser;
use crate::error::BrowserError;
use crate::utils::resolve_href;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::time::Duration;

/// Owned copy of an element taken from a snapshot page
#[derive(Debug, Clone)]
pub struct SnapshotElement {
    html: String,
    text: String,
    attributes: Vec<(String, String)>,
}

impl SnapshotElement {
    fn capture(element: ElementRef<'_>) -> Self {
        Self {
            html: element.html(),
            text: element.text().collect(),
            attributes: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Raw attribute value, unresolved
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// [`Browser`] that serves a fixed set of HTML pages from memory
///
/// Clicking an element with an `href` navigates to it; sleeps are recorded
/// instead of waited out.
#[derive(Debug, Default)]
pub struct SnapshotBrowser {
    pages: HashMap<String, String>,
    current_url: Option<String>,
    document: Option<Html>,
    visits: Vec<String>,
    slept: Duration,
}

impl SnapshotBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page, builder style
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.insert_page(url, html);
        self
    }

    pub fn insert_page(&mut self, url: &str, html: &str) {
        self.pages.insert(url.to_string(), html.to_string());
    }

    /// Every URL successfully opened, in order
    pub fn visits(&self) -> &[String] {
        &self.visits
    }

    /// Total settle time requested so far
    pub fn slept(&self) -> Duration {
        self.slept
    }

    fn document(&self) -> Result<&Html, BrowserError> {
        self.document.as_ref().ok_or_else(|| BrowserError::Navigation {
            url: "about:blank".to_string(),
            reason: "no page loaded".to_string(),
        })
    }

    fn base_url(&self) -> &str {
        self.current_url.as_deref().unwrap_or_default()
    }
}

fn parse_selector(selector: &str) -> Result<Selector, BrowserError> {
    Selector::parse(selector).map_err(|e| BrowserError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Matches beneath a captured element, excluding the element itself
fn select_in(scope: &SnapshotElement, selector: &Selector) -> Vec<SnapshotElement> {
    let fragment = Html::parse_fragment(&scope.html);
    let root = fragment
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .next();

    match root {
        Some(root) => root.select(selector).map(SnapshotElement::capture).collect(),
        None => Vec::new(),
    }
}

impl Browser for SnapshotBrowser {
    type Element = SnapshotElement;

    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let html = self
            .pages
            .get(url)
            .ok_or_else(|| BrowserError::Navigation {
                url: url.to_string(),
                reason: "no snapshot for this URL".to_string(),
            })?;

        self.document = Some(Html::parse_document(html));
        self.current_url = Some(url.to_string());
        self.visits.push(url.to_string());
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, BrowserError> {
        Ok(self.base_url().to_string())
    }

    async fn wait_until_present(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<SnapshotElement, BrowserError> {
        self.find(selector)
            .await?
            .ok_or_else(|| BrowserError::Timeout {
                selector: selector.to_string(),
                timeout,
            })
    }

    async fn find(&mut self, selector: &str) -> Result<Option<SnapshotElement>, BrowserError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .document()?
            .select(&selector)
            .next()
            .map(SnapshotElement::capture))
    }

    async fn find_all(&mut self, selector: &str) -> Result<Vec<SnapshotElement>, BrowserError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .document()?
            .select(&selector)
            .map(SnapshotElement::capture)
            .collect())
    }

    async fn find_in(
        &mut self,
        scope: &SnapshotElement,
        selector: &str,
    ) -> Result<Option<SnapshotElement>, BrowserError> {
        let selector = parse_selector(selector)?;
        Ok(select_in(scope, &selector).into_iter().next())
    }

    async fn find_all_in(
        &mut self,
        scope: &SnapshotElement,
        selector: &str,
    ) -> Result<Vec<SnapshotElement>, BrowserError> {
        let selector = parse_selector(selector)?;
        Ok(select_in(scope, &selector))
    }

    async fn click(&mut self, element: &SnapshotElement) -> Result<(), BrowserError> {
        match element.attr("href") {
            Some(href) => {
                let target = resolve_href(self.base_url(), href);
                self.navigate(&target).await
            }
            None => Ok(()),
        }
    }

    async fn read_text(&mut self, element: &SnapshotElement) -> Result<String, BrowserError> {
        Ok(element.text.clone())
    }

    async fn read_attribute(
        &mut self,
        element: &SnapshotElement,
        name: &str,
    ) -> Result<Option<String>, BrowserError> {
        let value = element.attr(name).map(|value| {
            if name == "href" {
                resolve_href(self.base_url(), value)
            } else {
                value.to_string()
            }
        });
        Ok(value)
    }

    async fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <main class="site-main">
            <article><div class="entry-content"><a href="/one/">One</a></div></article>
            <article><div class="entry-content"><p>no link</p></div></article>
        </main>
        <a class="next" href="?page=2">Next</a>
    </body></html>"#;

    #[tokio::test]
    async fn test_scoped_lookup_excludes_scope() {
        let mut browser = SnapshotBrowser::new().with_page("https://example.com/list/", PAGE);
        browser.navigate("https://example.com/list/").await.unwrap();

        let entries = browser.find_all("article").await.unwrap();
        assert_eq!(entries.len(), 2);

        let first = browser.find_in(&entries[0], "a").await.unwrap().unwrap();
        assert_eq!(browser.read_text(&first).await.unwrap(), "One");
        assert!(browser.find_in(&entries[1], "a").await.unwrap().is_none());

        // The scope element never matches itself
        assert!(browser.find_in(&entries[0], "article").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unparsable_selector_is_reported() {
        let mut browser = SnapshotBrowser::new().with_page("https://example.com/list/", PAGE);
        browser.navigate("https://example.com/list/").await.unwrap();

        let result = browser.find("div >").await;
        assert!(matches!(
            result,
            Err(BrowserError::InvalidSelector { ref selector, .. }) if selector == "div >"
        ));
    }

    #[tokio::test]
    async fn test_href_resolved_and_click_navigates() {
        let mut browser = SnapshotBrowser::new()
            .with_page("https://example.com/list/", PAGE)
            .with_page("https://example.com/list/?page=2", "<html><body></body></html>");
        browser.navigate("https://example.com/list/").await.unwrap();

        let link = browser.require(".entry-content a").await.unwrap();
        let href = browser.read_attribute(&link, "href").await.unwrap();
        assert_eq!(href.as_deref(), Some("https://example.com/one/"));

        let next = browser.require(".next").await.unwrap();
        browser.click(&next).await.unwrap();
        assert_eq!(
            browser.current_url().await.unwrap(),
            "https://example.com/list/?page=2"
        );
        assert_eq!(browser.visits().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_page_and_element() {
        let mut browser = SnapshotBrowser::new().with_page("https://example.com/list/", PAGE);
        let err = browser.navigate("https://example.com/missing/").await;
        assert!(matches!(err, Err(BrowserError::Navigation { .. })));

        browser.navigate("https://example.com/list/").await.unwrap();
        let err = browser
            .wait_until_present(".absent", Duration::from_secs(1))
            .await;
        assert!(matches!(err, Err(BrowserError::Timeout { .. })));

        browser.sleep(Duration::from_millis(1500)).await;
        assert_eq!(browser.slept(), Duration::from_millis(1500));
    }
}
