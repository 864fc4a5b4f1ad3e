//! Listing card → [`JobOffer`] normalization.

use std::path::Path;

use common::{JobOffer, NO_DESCRIPTION, save_records};
use regex::Regex;
use scraper::Selector;
use tracing::{info, warn};

use crate::extract::{FindFirst, RawListingNode, parse_selector};
use crate::{Result, ScrapeError};

pub struct Collator {
    title: Selector,
    company: Selector,
    location: Selector,
    date: Selector,
    rating: Selector,
    summary: Selector,
    salary: Selector,
    digits: Regex,
}

impl Collator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: parse_selector("h2.title")?,
            company: parse_selector("span.company")?,
            location: parse_selector("span.location")?,
            date: parse_selector("span.date")?,
            rating: parse_selector("span.ratingContent")?,
            summary: parse_selector("div.summary")?,
            salary: parse_selector("span.salaryText")?,
            digits: Regex::new(r"\d+")?,
        })
    }

    /// One offer per node, same order. Stops at the first card missing a
    /// mandatory field.
    pub fn collate(&self, nodes: &[RawListingNode]) -> Result<Vec<JobOffer>> {
        nodes
            .iter()
            .enumerate()
            .map(|(index, node)| self.offer(index, node))
            .collect()
    }

    /// Collates `nodes` and replaces the record set at `store` with the result.
    pub fn collate_and_save(&self, nodes: &[RawListingNode], store: &Path) -> Result<Vec<JobOffer>> {
        let offers = self.collate(nodes)?;
        save_records(store, &offers)?;
        info!(count = offers.len(), path = ?store, "saved scrape results");
        Ok(offers)
    }

    fn offer(&self, index: usize, node: &RawListingNode) -> Result<JobOffer> {
        let card = node.parse();
        let required = |selector: &Selector, field: &'static str| {
            card.first_text(selector)
                .ok_or(ScrapeError::MissingField { index, field })
        };

        let title = required(&self.title, "title")?;
        let company = required(&self.company, "company")?;
        let location = required(&self.location, "location")?;
        let ad_age = required(&self.date, "date")?;

        let rating = match card.first_text(&self.rating) {
            Some(text) => match text.parse::<i64>() {
                Ok(rating) => rating,
                Err(_) => return Err(ScrapeError::InvalidRating { index, text }),
            },
            None => 0,
        };

        let description = card
            .first_text(&self.summary)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        let salary = match card.first_text(&self.salary) {
            Some(text) => self.min_salary(&text).unwrap_or_else(|| {
                warn!(index, text = %text, "salary has no parseable figures, using 0");
                0
            }),
            None => 0,
        };

        Ok(JobOffer {
            title,
            company,
            rating,
            location,
            ad_age,
            salary,
            description,
        })
    }

    /// Smallest figure in a salary text such as "$80,000 - $95,000 a year".
    /// Figures too large for an `i64` are skipped.
    pub fn min_salary(&self, text: &str) -> Option<i64> {
        let cleaned = text.replace(['$', ','], "");
        self.digits
            .find_iter(&cleaned)
            .filter_map(|m| m.as_str().parse::<i64>().ok())
            .min()
    }
}
