//! Results-page parsing: the declared total count and the listing cards.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::fetch::RawResponse;
use crate::{Result, ScrapeError};

const TOTAL_COUNT: &str = "div#searchCountPages";
const LISTING_CARD: &str = "div.jobsearch-SerpJobCard";

/// An integer followed by the word "job(s)", e.g. "Page 1 of 37 jobs".
const COUNT_PATTERN: &str = r"(\d+)\sjob";

pub(crate) fn parse_selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css,
        message: format!("{e:?}"),
    })
}

/// First-match lookup over a parsed document or element.
pub trait FindFirst {
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'_>>;

    /// Text of the first match, trimmed.
    fn first_text(&self, selector: &Selector) -> Option<String> {
        self.find_first(selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
    }
}

impl FindFirst for Html {
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.select(selector).next()
    }
}

impl FindFirst for ElementRef<'_> {
    fn find_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.select(selector).next()
    }
}

/// One listing card, kept as its own HTML so cards from different pages can
/// be collected before any of them is collated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListingNode {
    html: String,
}

impl RawListingNode {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn parse(&self) -> Html {
        Html::parse_fragment(&self.html)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Cards in document order.
    pub listings: Vec<RawListingNode>,
    pub total_count: usize,
}

pub struct Extractor {
    total_count: Selector,
    listing: Selector,
    count_pattern: Regex,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            total_count: parse_selector(TOTAL_COUNT)?,
            listing: parse_selector(LISTING_CARD)?,
            count_pattern: Regex::new(COUNT_PATTERN)?,
        })
    }

    /// Parses a first results page. Fails when the page doesn't state how
    /// many results the search has.
    pub fn extract(&self, response: &RawResponse) -> Result<Extraction> {
        let document = Html::parse_document(&response.body);
        let total_count = self.total_count(&document)?;
        let listings = self.listings(&document);
        Ok(Extraction {
            listings,
            total_count,
        })
    }

    /// Cards of a continuation page; the count element isn't consulted.
    pub fn extract_listings(&self, response: &RawResponse) -> Vec<RawListingNode> {
        self.listings(&Html::parse_document(&response.body))
    }

    fn total_count(&self, document: &Html) -> Result<usize> {
        let text = document
            .first_text(&self.total_count)
            .ok_or(ScrapeError::MissingTotalCount)?;
        self.count_pattern
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .ok_or(ScrapeError::TotalCountPattern(text))
    }

    fn listings(&self, document: &Html) -> Vec<RawListingNode> {
        document
            .select(&self.listing)
            .map(|card| RawListingNode::new(card.html()))
            .collect()
    }
}
