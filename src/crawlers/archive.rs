use crate::browser::Browser;
use crate::config::CrawlerConfig;
use crate::crawlers::admission::{Admission, AdmissionPolicy, StopReason};
use crate::crawlers::context::CrawlContext;
use crate::crawlers::listing::ListingPaginator;
use crate::crawlers::years::YearWalker;
use crate::parsers::FieldExtractor;
use crate::results::Document;

/// Outcome of one crawl
#[derive(Debug)]
pub struct CrawlReport {
    /// Accepted documents in visiting order
    pub documents: Vec<Document>,
    pub stop: StopReason,
}

/// Walks the archive year by year and collects article documents
///
/// Years are visited newest first, listing pages in pagination order and
/// entries in page order. The crawl stops at the last known document, at the
/// maximum count, or when a year's listing cannot be read.
pub struct ArchiveCrawler<B: Browser> {
    browser: B,
    config: CrawlerConfig,
    policy: AdmissionPolicy,
    ctx: CrawlContext,
    start_year: Option<i32>,
}

impl<B: Browser> ArchiveCrawler<B> {
    pub fn new(
        browser: B,
        config: CrawlerConfig,
        max_count_documents: Option<usize>,
        last_document: Option<&Document>,
    ) -> Self {
        let ctx = CrawlContext::default();
        ::log::debug!(target: ctx.target(), "Parser init completed");
        ::log::info!(target: ctx.target(), "Set source: {}", ctx.target());

        Self {
            browser,
            config,
            policy: AdmissionPolicy::new(max_count_documents, last_document),
            ctx,
            start_year: None,
        }
    }

    /// Begin at `year` instead of the current calendar year
    pub fn with_start_year(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    /// Log through `ctx` instead of the default source context
    pub fn with_context(mut self, ctx: CrawlContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Run the crawl and return the accepted documents
    ///
    /// Never fails: a fatal error ends the crawl early and whatever was
    /// collected up to that point is returned.
    pub async fn content(&mut self) -> Vec<Document> {
        self.crawl().await.documents
    }

    /// Run the crawl, reporting why it stopped
    pub async fn crawl(&mut self) -> CrawlReport {
        ::log::debug!(target: self.ctx.target(), "Parse process start");

        let mut documents = Vec::new();
        let stop = self.parse(&mut documents).await;

        match &stop {
            StopReason::Fatal(e) => {
                ::log::debug!(target: self.ctx.target(), "Parsing stopped with error: {}", e)
            }
            StopReason::AlreadySeen => ::log::info!(
                target: self.ctx.target(),
                "Found already existing document, parse process finished"
            ),
            StopReason::MaxCountReached(max) => ::log::info!(
                target: self.ctx.target(),
                "Max count articles reached ({}), parse process finished",
                max
            ),
            StopReason::Exhausted => {
                ::log::debug!(target: self.ctx.target(), "Parse process finished")
            }
        }
        ::log::info!(
            target: self.ctx.target(),
            "Collected {} documents",
            documents.len()
        );

        CrawlReport { documents, stop }
    }

    /// Hand the browser back, e.g. to close the session
    pub fn into_browser(self) -> B {
        self.browser
    }

    async fn parse(&mut self, documents: &mut Vec<Document>) -> StopReason {
        ::log::debug!(target: self.ctx.target(), "Parser enter to {}", self.config.host);

        let years = match self.start_year {
            Some(year) => YearWalker::starting_at(&self.config.host, year),
            None => YearWalker::new(&self.config.host),
        };
        let paginator = ListingPaginator::new(&self.config, &self.ctx);
        let extractor = FieldExtractor::new(&self.config, &self.ctx);

        for archive_url in years {
            if self.policy.is_full(documents.len()) {
                return StopReason::MaxCountReached(documents.len());
            }

            let links = match paginator.collect(&mut self.browser, &archive_url).await {
                Ok(links) => links,
                Err(e) => return StopReason::Fatal(e),
            };
            ::log::info!(
                target: self.ctx.target(),
                "Collected {} links from {}",
                links.len(),
                archive_url
            );

            for link in links {
                if self.policy.is_full(documents.len()) {
                    return StopReason::MaxCountReached(documents.len());
                }

                let document = match extractor.extract(&mut self.browser, &link).await {
                    Ok(document) => document,
                    Err(e) => {
                        ::log::warn!(target: self.ctx.target(), "Skipping document: {}", e);
                        continue;
                    }
                };

                match self.policy.admit(&document, documents.len()) {
                    Admission::Accept => {
                        ::log::info!(target: self.ctx.target(), "{}", document.log_line());
                        documents.push(document);
                    }
                    Admission::Halt(reason) => return reason,
                }
            }
        }

        StopReason::Exhausted
    }
}
