use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder for any text field that could not be extracted
pub const NOT_AVAILABLE: &str = "N/A";

/// Column order shared by every tabular export
pub const LISTING_HEADERS: [&str; 5] = ["Title", "Company", "Location", "Date Posted", "Job URL"];

/// One job posting scraped from a results page
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Date Posted")]
    pub date_posted: Option<NaiveDate>,
    #[serde(rename = "Job URL")]
    pub url: String,
}

impl Default for ListingRecord {
    fn default() -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            company: NOT_AVAILABLE.to_string(),
            location: NOT_AVAILABLE.to_string(),
            date_posted: None,
            url: NOT_AVAILABLE.to_string(),
        }
    }
}

impl ListingRecord {
    /// Values in `LISTING_HEADERS` order, with a missing date rendered as an empty cell
    pub fn to_row(&self) -> [String; 5] {
        [
            self.title.clone(),
            self.company.clone(),
            self.location.clone(),
            self.date_posted
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.url.clone(),
        ]
    }
}

/// Rendered HTML of a page, or `None` when it timed out or failed to load
pub type PageFetchResult = Option<String>;

/// Outcome of extracting a single listing card
#[derive(Debug, Clone, PartialEq)]
pub enum CardOutcome {
    Parsed(ListingRecord),
    Skipped { index: usize, reason: String },
}

/// User input for one scraping run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub location: String,
    pub pages: u32,
}

/// Per-run counters reported once the fetch loop finishes
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_requested: u32,
    pub pages_loaded: u32,
    pub pages_skipped: u32,
    pub listings: usize,
}
