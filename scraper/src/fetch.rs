//! Blocking page fetcher with an optional response cache.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, info, warn};

use crate::cache::{CachedResponse, ResponseCache};
use crate::{Result, ScrapeError};

/// Sent with every request; results pages are served differently to
/// clients that don't look like a browser.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:86.0) Gecko/20100101 Firefox/86.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub from_cache: bool,
}

/// Anything that can hand back a results page for a URL.
pub trait PageSource {
    /// With `bypass_cache` set the page comes from the network and is not
    /// stored.
    fn fetch(&mut self, url: &str, bypass_cache: bool) -> Result<RawResponse>;
}

pub struct Fetcher {
    client: Client,
    cache: Option<ResponseCache>,
}

impl Fetcher {
    /// Requests are never timed out; a stalled server blocks the scrape.
    pub fn new(cache: Option<ResponseCache>) -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client, cache })
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    fn cached(&self, key: &str) -> Option<&CachedResponse> {
        self.cache.as_ref().and_then(|cache| cache.get(key))
    }
}

impl PageSource for Fetcher {
    fn fetch(&mut self, url: &str, bypass_cache: bool) -> Result<RawResponse> {
        let key = ResponseCache::key(url, BROWSER_USER_AGENT);

        if !bypass_cache {
            if let Some(hit) = self.cached(&key) {
                debug!(url, "cache hit");
                return Ok(RawResponse {
                    url: url.to_string(),
                    status: hit.status,
                    body: hit.body.clone(),
                    from_cache: true,
                });
            }
        }

        info!(url, bypass_cache, "fetching");
        let http_err = |source: reqwest::Error| ScrapeError::Http {
            url: url.to_string(),
            source,
        };
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .map_err(http_err)?;
        let status = response.status();
        let body = response.text().map_err(http_err)?;
        debug!(url, status = status.as_u16(), bytes = body.len(), "fetched");

        if !status.is_success() {
            warn!(url, status = status.as_u16(), "non-success response");
        } else if !bypass_cache {
            if let Some(cache) = self.cache.as_mut() {
                cache.insert(
                    key,
                    CachedResponse {
                        status: status.as_u16(),
                        body: body.clone(),
                    },
                )?;
            }
        }

        Ok(RawResponse {
            url: url.to_string(),
            status: status.as_u16(),
            body,
            from_cache: false,
        })
    }
}
