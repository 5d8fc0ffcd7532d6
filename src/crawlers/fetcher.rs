use crate::browser::Browser;
use crate::config::Selectors;
use crate::crawlers::context::CrawlContext;
use crate::error::BrowserError;
use std::time::Duration;

/// Opens pages for the crawl: navigate, settle, dismiss the cookie banner
pub struct PageFetcher<'a> {
    selectors: &'a Selectors,
    ctx: &'a CrawlContext,
}

impl<'a> PageFetcher<'a> {
    pub fn new(selectors: &'a Selectors, ctx: &'a CrawlContext) -> Self {
        Self { selectors, ctx }
    }

    /// Navigate to `url` and wait `settle_delay` before the page is read
    pub async fn load<B: Browser>(
        &self,
        browser: &mut B,
        url: &str,
        settle_delay: Duration,
    ) -> Result<(), BrowserError> {
        browser.navigate(url).await?;
        ::log::debug!(target: self.ctx.target(), "Entered on web page {}", url);
        browser.sleep(settle_delay).await;
        self.agree_cookie_pass(browser, url).await;
        Ok(())
    }

    /// Accept the cookie-consent overlay if the page shows one
    async fn agree_cookie_pass<B: Browser>(&self, browser: &mut B, requested: &str) {
        let url = browser
            .current_url()
            .await
            .unwrap_or_else(|_| requested.to_string());
        match browser.find(&self.selectors.cookie_accept).await {
            Ok(Some(button)) => match browser.click(&button).await {
                Ok(()) => {
                    ::log::debug!(target: self.ctx.target(), "Passed cookie modal on page: {}", url)
                }
                Err(e) => ::log::debug!(
                    target: self.ctx.target(),
                    "Cookie modal on {} could not be dismissed: {}",
                    url,
                    e
                ),
            },
            Ok(None) => {
                ::log::debug!(target: self.ctx.target(), "Modal agree not found on page: {}", url)
            }
            Err(e) => ::log::debug!(
                target: self.ctx.target(),
                "Cookie modal lookup failed on {}: {}",
                url,
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::SnapshotBrowser;

    #[tokio::test]
    async fn test_load_settles_and_accepts_cookies() {
        let page = r#"<html><body>
            <button id="onetrust-accept-btn-handler">Accept</button>
            <h1>Hello</h1>
        </body></html>"#;
        let mut browser = SnapshotBrowser::new().with_page("https://www.nfcw.com/2024/", page);
        let selectors = Selectors::default();
        let ctx = CrawlContext::default();
        let fetcher = PageFetcher::new(&selectors, &ctx);

        fetcher
            .load(&mut browser, "https://www.nfcw.com/2024/", Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(browser.slept(), Duration::from_secs(2));
        // The button has no href, so accepting it keeps the page in place
        assert_eq!(browser.visits(), ["https://www.nfcw.com/2024/"]);
    }

    #[tokio::test]
    async fn test_cookie_pass_runs_on_the_page_shown() {
        let page = r#"<html><body>
            <a id="onetrust-accept-btn-handler" href="/consent/">Accept</a>
        </body></html>"#;
        let mut browser = SnapshotBrowser::new()
            .with_page("https://www.nfcw.com/2024/", page)
            .with_page("https://www.nfcw.com/consent/", "<html><body></body></html>");
        let selectors = Selectors::default();
        let ctx = CrawlContext::default();
        let fetcher = PageFetcher::new(&selectors, &ctx);

        fetcher
            .load(&mut browser, "https://www.nfcw.com/2024/", Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(
            browser.current_url().await.unwrap(),
            "https://www.nfcw.com/consent/"
        );
        assert_eq!(
            browser.visits(),
            ["https://www.nfcw.com/2024/", "https://www.nfcw.com/consent/"]
        );
    }

    #[tokio::test]
    async fn test_load_reports_navigation_failure() {
        let mut browser = SnapshotBrowser::new();
        let selectors = Selectors::default();
        let ctx = CrawlContext::default();
        let fetcher = PageFetcher::new(&selectors, &ctx);

        let result = fetcher
            .load(&mut browser, "https://www.nfcw.com/1990/", Duration::from_secs(2))
            .await;
        assert!(matches!(result, Err(BrowserError::Navigation { .. })));
        assert_eq!(browser.slept(), Duration::ZERO);
    }
}
