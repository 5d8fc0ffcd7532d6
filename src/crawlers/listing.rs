use crate::browser::Browser;
use crate::config::CrawlerConfig;
use crate::crawlers::context::CrawlContext;
use crate::crawlers::fetcher::PageFetcher;
use crate::error::{BrowserError, CrawlError};

/// Collects article links from one year's archive, following pagination
pub struct ListingPaginator<'a> {
    config: &'a CrawlerConfig,
    ctx: &'a CrawlContext,
    fetcher: PageFetcher<'a>,
}

impl<'a> ListingPaginator<'a> {
    pub fn new(config: &'a CrawlerConfig, ctx: &'a CrawlContext) -> Self {
        Self {
            config,
            ctx,
            fetcher: PageFetcher::new(&config.selectors, ctx),
        }
    }

    /// Links of every listing page reachable from `url`, in visiting order
    ///
    /// Fails when the archive root cannot be opened or shows no listing
    /// container. Entries without a readable link are skipped.
    pub async fn collect<B: Browser>(
        &self,
        browser: &mut B,
        url: &str,
    ) -> Result<Vec<String>, CrawlError> {
        let selectors = &self.config.selectors;

        self.fetcher
            .load(browser, url, self.config.listing_settle())
            .await
            .map_err(|source| CrawlError::Navigation {
                url: url.to_string(),
                source,
            })?;

        browser
            .wait_until_present(&selectors.listing_container, self.config.wait_timeout())
            .await
            .map_err(|source| self.listing_not_found(url, source))?;

        let mut links = Vec::new();
        let mut pages = 0;

        loop {
            pages += 1;
            ::log::debug!(target: self.ctx.target(), "Loading listing page {} of {}", pages, url);

            let found = self.page_links(browser, url).await?;
            ::log::debug!(
                target: self.ctx.target(),
                "Listing page {} of {} holds {} links",
                pages,
                url,
                found.len()
            );
            links.extend(found);

            if self.config.max_listing_pages.is_some_and(|max| pages >= max.get()) {
                ::log::warn!(
                    target: self.ctx.target(),
                    "Listing page ceiling of {} reached for {}",
                    pages,
                    url
                );
                break;
            }

            if !self.next_page(browser).await {
                break;
            }
        }

        Ok(links)
    }

    /// Scan the entries of the page currently shown
    async fn page_links<B: Browser>(
        &self,
        browser: &mut B,
        url: &str,
    ) -> Result<Vec<String>, CrawlError> {
        let selectors = &self.config.selectors;

        let container = browser
            .require(&selectors.listing_container)
            .await
            .map_err(|source| self.listing_not_found(url, source))?;
        let entries = browser
            .find_all_in(&container, &selectors.listing_entry)
            .await
            .map_err(|source| self.listing_not_found(url, source))?;

        let mut links = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match self.entry_link(browser, entry).await {
                Ok(link) => links.push(link),
                Err(e) => {
                    ::log::debug!(target: self.ctx.target(), "Doc link not found in entry {}: {}", index, e)
                }
            }
        }
        Ok(links)
    }

    async fn entry_link<B: Browser>(
        &self,
        browser: &mut B,
        entry: &B::Element,
    ) -> Result<String, BrowserError> {
        let selector = &self.config.selectors.entry_link;
        let anchor = browser
            .find_in(entry, selector)
            .await?
            .ok_or_else(|| BrowserError::NoSuchElement {
                selector: selector.clone(),
            })?;

        browser
            .read_attribute(&anchor, "href")
            .await?
            .ok_or_else(|| BrowserError::NoSuchElement {
                selector: format!("{}[href]", selector),
            })
    }

    /// Activate the next-page control; `false` once there is none
    async fn next_page<B: Browser>(&self, browser: &mut B) -> bool {
        let control = match browser.find(&self.config.selectors.next_page).await {
            Ok(Some(control)) => control,
            Ok(None) => {
                ::log::warn!(
                    target: self.ctx.target(),
                    "No next page control, listing finished"
                );
                return false;
            }
            Err(e) => {
                ::log::warn!(target: self.ctx.target(), "Next page lookup failed: {}", e);
                return false;
            }
        };

        if let Err(e) = browser.click(&control).await {
            ::log::warn!(
                target: self.ctx.target(),
                "Could not move to the next page, stopping listing: {}",
                e
            );
            return false;
        }

        browser.sleep(self.config.pagination_settle()).await;
        ::log::debug!(target: self.ctx.target(), "Moved to the next listing page");
        true
    }

    fn listing_not_found(&self, url: &str, source: BrowserError) -> CrawlError {
        CrawlError::ListingNotFound {
            url: url.to_string(),
            selector: self.config.selectors.listing_container.clone(),
            source,
        }
    }
}
