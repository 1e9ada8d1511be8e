use crate::helpers::{element_text, DateNormalizer};
use crate::models::{CardOutcome, ListingRecord, NOT_AVAILABLE};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use url::Url;

pub const BASE_URL: &str = "https://in.indeed.com";

/// Results per page; the `start` parameter advances by this much
pub const PAGE_SIZE: u32 = 10;

/// CSS selectors for each listing field. Every field takes a list of
/// selectors that are tried in order until one matches.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectorConfig {
    pub card: String,
    pub title: Vec<String>,
    pub company: Vec<String>,
    pub location: Vec<String>,
    /// Empty list disables date collection
    pub date: Vec<String>,
    pub link: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        fn list(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            card: "div.job_seen_beacon".to_string(),
            title: list(&["h2.jobTitle"]),
            company: list(&["span.css-1h7lukg.eu4oa1w0", "[data-testid=\"company-name\"]"]),
            location: list(&["div.company_location", "[data-testid=\"text-location\"]"]),
            date: list(&["span.heading6.error-text.tapItem-gutter", "span.date"]),
            link: list(&["a.jcs-JobTitle"]),
        }
    }
}

/// Build the search URL for a zero-indexed results page
pub fn build_search_url(origin: &Url, query: &str, location: &str, page: u32) -> Url {
    let mut url = origin.clone();
    url.set_path("/jobs");
    url.query_pairs_mut()
        .clear()
        .append_pair("q", query)
        .append_pair("l", location)
        .append_pair("start", &page.saturating_mul(PAGE_SIZE).to_string());
    url
}

struct CompiledSelectors {
    card: Selector,
    title: Vec<Selector>,
    company: Vec<Selector>,
    location: Vec<Selector>,
    date: Vec<Selector>,
    link: Vec<Selector>,
}

fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn compile_all(selectors: &[String]) -> Result<Vec<Selector>, ExtractError> {
    selectors.iter().map(|s| compile(s)).collect()
}

/// First element inside `card` matched by any of `selectors`, in list order
fn select_first<'a>(card: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|sel| card.select(sel).next())
}

/// Parses rendered results pages into listing records
pub struct ListingExtractor {
    selectors: CompiledSelectors,
    origin: Url,
    dates: DateNormalizer,
}

impl ListingExtractor {
    /// Create an extractor for the default site with the given selectors
    pub fn new(config: &SelectorConfig) -> Result<Self, ExtractError> {
        Self::with_origin(config, BASE_URL, DateNormalizer::default())
    }

    /// Create an extractor resolving links against `origin`
    pub fn with_origin(
        config: &SelectorConfig,
        origin: &str,
        dates: DateNormalizer,
    ) -> Result<Self, ExtractError> {
        let origin = Url::parse(origin).map_err(|e| ExtractError::InvalidOrigin {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;
        let selectors = CompiledSelectors {
            card: compile(&config.card)?,
            title: compile_all(&config.title)?,
            company: compile_all(&config.company)?,
            location: compile_all(&config.location)?,
            date: compile_all(&config.date)?,
            link: compile_all(&config.link)?,
        };
        Ok(Self {
            selectors,
            origin,
            dates,
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Extract every card on the page, keeping successes only
    pub fn parse(&self, html: &str) -> Vec<ListingRecord> {
        let outcomes = self.parse_cards(html);
        let total = outcomes.len();

        let listings: Vec<ListingRecord> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                CardOutcome::Parsed(record) => Some(record),
                CardOutcome::Skipped { index, reason } => {
                    log::warn!("Error scraping job card {}: {}", index + 1, reason);
                    None
                }
            })
            .collect();

        if total == 0 {
            log::info!("No job cards found on this page.");
        } else {
            log::info!("Found {} jobs on this page.", listings.len());
        }
        listings
    }

    /// Per-card outcomes in document order
    pub fn parse_cards(&self, html: &str) -> Vec<CardOutcome> {
        let document = Html::parse_document(html);
        document
            .select(&self.selectors.card)
            .enumerate()
            .map(|(index, card)| match self.extract_card(card) {
                Ok(record) => {
                    log::debug!(
                        "Title: {} | Company: {} | Location: {} | Date Posted: {:?} | Link: {}",
                        record.title,
                        record.company,
                        record.location,
                        record.date_posted,
                        record.url
                    );
                    CardOutcome::Parsed(record)
                }
                Err(e) => CardOutcome::Skipped {
                    index,
                    reason: e.to_string(),
                },
            })
            .collect()
    }

    fn extract_card(&self, card: ElementRef<'_>) -> Result<ListingRecord, ExtractError> {
        let title = element_text(select_first(card, &self.selectors.title));
        let company = element_text(select_first(card, &self.selectors.company));
        let location = element_text(select_first(card, &self.selectors.location));

        let date_posted = if self.selectors.date.is_empty() {
            None
        } else {
            self.dates
                .normalize(&element_text(select_first(card, &self.selectors.date)))
        };

        let url = match select_first(card, &self.selectors.link)
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
        {
            Some(href) => self.resolve_link(href)?,
            None => NOT_AVAILABLE.to_string(),
        };

        Ok(ListingRecord {
            title,
            company,
            location,
            date_posted,
            url,
        })
    }

    fn resolve_link(&self, href: &str) -> Result<String, ExtractError> {
        self.origin
            .join(href)
            .map(|u| u.to_string())
            .map_err(|e| ExtractError::InvalidLink {
                href: href.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Errors raised while building the extractor or reading a single card
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid site origin `{origin}`: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("could not resolve job link `{href}`: {reason}")]
    InvalidLink { href: String, reason: String },
}
