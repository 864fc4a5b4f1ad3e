//! Scrape driver: first page, continuation pages, collation, save.

use tracing::info;

use crate::collate::Collator;
use crate::config::Settings;
use crate::extract::{Extraction, Extractor};
use crate::fetch::PageSource;
use crate::query::{SearchQuery, page_url};
use crate::{JobOffer, Result};

/// Results shown per page by the site.
pub const PAGE_SIZE: usize = 10;

/// Offsets of the pages fetched after the first one.
///
/// Runs from `PAGE_SIZE` up to `total + PAGE_SIZE - 1` exclusive, so a total
/// just past a page boundary (or exactly on one) asks for one page beyond the
/// last populated page. The extra page is requested anyway. The end is
/// saturated and offsets are yielded lazily, so an absurd declared total
/// neither overflows nor allocates.
pub fn page_offsets(total: usize) -> impl Iterator<Item = usize> {
    let end = if total <= PAGE_SIZE {
        PAGE_SIZE
    } else {
        total.saturating_add(PAGE_SIZE - 1)
    };
    (PAGE_SIZE..end).step_by(PAGE_SIZE)
}

pub struct ScrapePipeline {
    extractor: Extractor,
    collator: Collator,
}

impl ScrapePipeline {
    pub fn new() -> Result<Self> {
        Ok(Self {
            extractor: Extractor::new()?,
            collator: Collator::new()?,
        })
    }

    /// Fetches the first page at `base_url` and then every continuation page,
    /// concatenating the cards in page order.
    pub fn gather<S: PageSource>(
        &self,
        source: &mut S,
        base_url: &str,
        bypass_cache: bool,
    ) -> Result<Extraction> {
        let first = source.fetch(base_url, bypass_cache)?;
        let mut extraction = self.extractor.extract(&first)?;
        info!(
            total = extraction.total_count,
            on_first_page = extraction.listings.len(),
            "found results"
        );

        for offset in page_offsets(extraction.total_count) {
            let page = source.fetch(&page_url(base_url, offset), bypass_cache)?;
            let listings = self.extractor.extract_listings(&page);
            info!(offset, found = listings.len(), "results page");
            extraction.listings.extend(listings);
        }

        Ok(extraction)
    }

    /// Full scrape for `query`; the record set at `settings.results_path` is
    /// replaced with the result.
    pub fn run<S: PageSource>(
        &self,
        source: &mut S,
        query: &SearchQuery,
        settings: &Settings,
    ) -> Result<Vec<JobOffer>> {
        let base_url = query.url(&settings.base_url);
        info!("Attempting web scrape...");
        let extraction = self.gather(source, &base_url, query.no_cache)?;

        info!(
            "Collating data for {} jobs ({} listings collected)...",
            extraction.total_count,
            extraction.listings.len()
        );
        let offers = self
            .collator
            .collate_and_save(&extraction.listings, &settings.results_path)?;
        info!("Done!");
        Ok(offers)
    }
}
