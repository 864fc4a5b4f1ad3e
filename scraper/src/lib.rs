//! Indeed job scraper: builds a search URL, walks every results page,
//! normalizes each listing card into a [`JobOffer`] and saves the set.

pub mod cache;
pub mod collate;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod query;

pub use cache::{CachedResponse, ResponseCache};
pub use collate::Collator;
pub use common::JobOffer;
pub use config::Settings;
pub use error::ScrapeError;
pub use extract::{Extraction, Extractor, FindFirst, RawListingNode};
pub use fetch::{BROWSER_USER_AGENT, Fetcher, PageSource, RawResponse};
pub use pipeline::{PAGE_SIZE, ScrapePipeline, page_offsets};
pub use query::SearchQuery;

pub type Result<T> = std::result::Result<T, ScrapeError>;
