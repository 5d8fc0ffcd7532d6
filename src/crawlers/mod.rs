pub mod admission;
pub mod archive;
pub mod context;
pub mod fetcher;
pub mod listing;
pub mod years;

#[cfg(test)]
mod tests;

pub use admission::{Admission, AdmissionPolicy, StopReason};
pub use archive::{ArchiveCrawler, CrawlReport};
pub use context::CrawlContext;
pub use listing::ListingPaginator;
pub use years::YearWalker;
