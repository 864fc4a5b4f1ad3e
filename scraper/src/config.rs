//! Runtime settings: built-in defaults, overridable through `JOBSCRAPE_*`
//! environment variables.

use std::path::PathBuf;

use ::config::{Config, Environment, Source};
use serde::Deserialize;

use crate::Result;

pub const ENV_PREFIX: &str = "JOBSCRAPE";

pub const DEFAULT_BASE_URL: &str = "https://au.indeed.com/jobs?";
pub const DEFAULT_RESULTS_PATH: &str = "data/scrape_results.json";
pub const DEFAULT_CACHE_PATH: &str = "data/scraping-cache.json";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Search endpoint, ending where the query string starts.
    pub base_url: String,
    /// Where the record set of the last scrape lives.
    pub results_path: PathBuf,
    pub cache_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
        }
    }
}

impl Settings {
    /// Defaults overlaid with the process environment.
    pub fn load() -> Result<Self> {
        Self::with_source(Environment::with_prefix(ENV_PREFIX))
    }

    pub fn with_source<S>(source: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("results_path", DEFAULT_RESULTS_PATH)?
            .set_default("cache_path", DEFAULT_CACHE_PATH)?
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
