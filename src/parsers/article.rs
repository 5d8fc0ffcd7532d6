use crate::browser::Browser;
use crate::config::{CrawlerConfig, TagGroupSelector};
use crate::crawlers::context::CrawlContext;
use crate::crawlers::fetcher::PageFetcher;
use crate::error::{BrowserError, CrawlError};
use crate::parsers::date::parse_publication_date;
use crate::parsers::text::{self, TextOptions};
use crate::results::{Document, OtherValue, Tag};

fn field_error(url: &str, field: &'static str) -> impl FnOnce(BrowserError) -> CrawlError {
    move |source| CrawlError::RequiredField {
        url: url.to_string(),
        field,
        source,
    }
}

/// Reads one article page into a [`Document`]
///
/// Title, publication date and link are required: any failure while reading
/// them discards the article. Author, body and tag groups are read
/// independently and are simply left out when the page does not have them.
pub struct FieldExtractor<'a> {
    config: &'a CrawlerConfig,
    ctx: &'a CrawlContext,
    fetcher: PageFetcher<'a>,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(config: &'a CrawlerConfig, ctx: &'a CrawlContext) -> Self {
        Self {
            config,
            ctx,
            fetcher: PageFetcher::new(&config.selectors, ctx),
        }
    }

    /// Open `url` and build its document
    pub async fn extract<B: Browser>(
        &self,
        browser: &mut B,
        url: &str,
    ) -> Result<Document, CrawlError> {
        ::log::debug!(target: self.ctx.target(), "Start parse document by url: {}", url);

        self.fetcher
            .load(browser, url, self.config.article_settle())
            .await
            .map_err(|source| CrawlError::Navigation {
                url: url.to_string(),
                source,
            })?;

        let mut document = self.required(browser, url).await?;

        if let Some(author) = self.optional("author", self.author(browser)).await {
            document
                .other_data
                .insert("author".to_string(), OtherValue::Text(author));
        }

        document.text = self.optional("main text", self.body(browser)).await;

        for group in &self.config.selectors.tag_groups {
            if let Some(tags) = self.optional(&group.key, self.tag_group(browser, group)).await {
                document
                    .other_data
                    .insert(group.key.clone(), OtherValue::Tags(tags));
            }
        }

        Ok(document)
    }

    async fn required<B: Browser>(
        &self,
        browser: &mut B,
        url: &str,
    ) -> Result<Document, CrawlError> {
        let selectors = &self.config.selectors;

        let title_element = browser
            .require(&selectors.title)
            .await
            .map_err(field_error(url, "title"))?;
        let raw_title = browser
            .read_text(&title_element)
            .await
            .map_err(field_error(url, "title"))?;
        let title = text::non_empty(&raw_title, &TextOptions::inline()).ok_or_else(|| {
            CrawlError::EmptyField {
                url: url.to_string(),
                field: "title",
            }
        })?;

        let date_element = browser
            .require(&selectors.published)
            .await
            .map_err(field_error(url, "publication_date"))?;
        let raw_date = browser
            .read_attribute(&date_element, "datetime")
            .await
            .map_err(field_error(url, "publication_date"))?
            .ok_or_else(|| CrawlError::EmptyField {
                url: url.to_string(),
                field: "publication_date",
            })?;
        let publication_date =
            parse_publication_date(&raw_date).map_err(|source| CrawlError::InvalidDate {
                url: url.to_string(),
                value: raw_date.clone(),
                source,
            })?;

        Ok(Document::new(title, url.to_string(), publication_date))
    }

    /// Swallow a failed optional read, logging it
    async fn optional<T>(
        &self,
        field: &str,
        read: impl Future<Output = Result<Option<T>, BrowserError>>,
    ) -> Option<T> {
        match read.await {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                ::log::debug!(target: self.ctx.target(), "There isn't {} in the page", field);
                None
            }
            Err(e) => {
                ::log::debug!(target: self.ctx.target(), "Reading {} failed: {}", field, e);
                None
            }
        }
    }

    async fn author<B: Browser>(&self, browser: &mut B) -> Result<Option<String>, BrowserError> {
        let Some(element) = browser.find(&self.config.selectors.author).await? else {
            return Ok(None);
        };
        let raw = browser.read_text(&element).await?;
        Ok(text::non_empty(&raw, &TextOptions::inline()))
    }

    async fn body<B: Browser>(&self, browser: &mut B) -> Result<Option<String>, BrowserError> {
        let Some(element) = browser.find(&self.config.selectors.body).await? else {
            return Ok(None);
        };
        let raw = browser.read_text(&element).await?;
        Ok(text::non_empty(&raw, &TextOptions::body()))
    }

    /// `{title, href}` of every link in the group's container, in DOM order
    async fn tag_group<B: Browser>(
        &self,
        browser: &mut B,
        group: &TagGroupSelector,
    ) -> Result<Option<Vec<Tag>>, BrowserError> {
        let Some(container) = browser.find(&group.container).await? else {
            return Ok(None);
        };
        let links = browser
            .find_all_in(&container, &self.config.selectors.tag_link)
            .await?;

        let mut tags = Vec::with_capacity(links.len());
        for link in &links {
            tags.push(Tag {
                title: browser.read_attribute(link, "title").await?,
                href: browser.read_attribute(link, "href").await?,
            });
        }

        Ok((!tags.is_empty()).then_some(tags))
    }
}
