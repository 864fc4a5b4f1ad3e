use std::io;
use std::path::PathBuf;

use common::StoreError;
use thiserror::Error;

/// Every way a scrape can fail. None of these are retried.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid selector {selector:?}: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("results page has no total count element")]
    MissingTotalCount,

    #[error("no job count in {0:?}")]
    TotalCountPattern(String),

    #[error("listing {index} has no {field} element")]
    MissingField { index: usize, field: &'static str },

    #[error("listing {index} has a non-integer rating {text:?}")]
    InvalidRating { index: usize, text: String },

    #[error("response cache I/O error at {path:?}: {source}")]
    CacheIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("response cache at {path:?} is corrupt: {source}")]
    CacheFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid settings: {0}")]
    Config(#[from] ::config::ConfigError),
}
