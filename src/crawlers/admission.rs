use crate::error::CrawlError;
use crate::results::Document;

/// Why a crawl ended
#[derive(Debug)]
pub enum StopReason {
    /// Reached the last document known from a previous run
    AlreadySeen,
    /// The configured maximum number of documents was collected
    MaxCountReached(usize),
    /// The year sequence ran out
    Exhausted,
    /// A listing page could not be loaded or read
    Fatal(CrawlError),
}

impl StopReason {
    /// Expected end of a crawl, as opposed to a failure
    pub fn is_normal(&self) -> bool {
        !matches!(self, StopReason::Fatal(_))
    }
}

/// Decision taken for one freshly extracted document
#[derive(Debug)]
pub enum Admission {
    Accept,
    Halt(StopReason),
}

/// Decides whether an extracted document is kept and whether the crawl goes on
#[derive(Debug, Clone, Default)]
pub struct AdmissionPolicy {
    max_count: Option<usize>,
    last_hash: Option<String>,
}

impl AdmissionPolicy {
    pub fn new(max_count: Option<usize>, last_document: Option<&Document>) -> Self {
        Self {
            max_count,
            last_hash: last_document.map(Document::hash),
        }
    }

    /// Whether `accepted` documents already fill the configured maximum
    pub fn is_full(&self, accepted: usize) -> bool {
        self.max_count.is_some_and(|max| accepted >= max)
    }

    pub fn admit(&self, document: &Document, accepted: usize) -> Admission {
        if self
            .last_hash
            .as_deref()
            .is_some_and(|hash| hash == document.hash())
        {
            return Admission::Halt(StopReason::AlreadySeen);
        }

        if let Some(max) = self.max_count {
            if accepted >= max {
                return Admission::Halt(StopReason::MaxCountReached(max));
            }
        }

        Admission::Accept
    }
}
