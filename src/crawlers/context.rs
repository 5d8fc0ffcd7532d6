/// Log scope of one crawl invocation
///
/// Every component of a crawl logs through the same context, under the
/// source name as log target, so a host can filter one source with
/// `RUST_LOG=nfcw=debug`.
#[derive(Debug, Clone)]
pub struct CrawlContext {
    source: String,
}

impl CrawlContext {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }

    /// Log target for this crawl's records
    pub fn target(&self) -> &str {
        &self.source
    }
}

impl Default for CrawlContext {
    fn default() -> Self {
        Self::new(crate::SOURCE_NAME)
    }
}
