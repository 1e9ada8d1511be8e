//! Text and date helpers shared by the listing extractor
//!
//! - Safe text extraction from optional HTML elements
//! - Whitespace cleanup for rendered markup
//! - Normalization of human-readable "posted" dates
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_job_scraper::helpers::{clean_text, DateNormalizer};
//!
//! assert_eq!(clean_text("  Senior\n   Engineer "), "Senior Engineer");
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! let normalizer = DateNormalizer::default();
//! assert_eq!(
//!     normalizer.normalize_on("Posted 3 days ago", today),
//!     NaiveDate::from_ymd_opt(2024, 3, 7)
//! );
//! ```

use crate::models::NOT_AVAILABLE;
use chrono::{Days, Local, NaiveDate};
use regex::Regex;
use scraper::ElementRef;

/// Default absolute date layout, e.g. "12 Jan 2024"
pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y";

/// Absolute layouts tried in order, e.g. "12 Jan 2024" or "Fri Jan 12, 2024"
pub const DEFAULT_DATE_FORMATS: [&str; 2] = [DEFAULT_DATE_FORMAT, "%a %b %d, %Y"];

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed text of an element, or the sentinel when the element is absent or blank
pub fn element_text(element: Option<ElementRef<'_>>) -> String {
    element
        .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Converts "today", "3 days ago", "12 Jan 2024" and friends into calendar dates
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    formats: Vec<String>,
    days_ago: Regex,
    today: Option<NaiveDate>,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::with_formats(DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect())
    }
}

impl DateNormalizer {
    /// Create a normalizer that tries the given chrono formats for absolute dates
    pub fn with_formats(formats: Vec<String>) -> Self {
        Self {
            formats,
            // "3 days ago", "1 day ago", "30+ days ago"
            days_ago: Regex::new(r"(\d+)\+?\s*days?\s+ago").expect("static regex"),
            today: None,
        }
    }

    /// Pin the date that relative phrases count back from
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Normalize relative to the pinned date, or the local calendar date
    pub fn normalize(&self, text: &str) -> Option<NaiveDate> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        self.normalize_on(text, today)
    }

    /// Normalize relative to an explicit `today`
    pub fn normalize_on(&self, text: &str, today: NaiveDate) -> Option<NaiveDate> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
            return None;
        }

        let lower = trimmed.to_lowercase();
        if lower.contains("today") || lower.contains("just posted") {
            return Some(today);
        }
        if lower.contains("yesterday") {
            return today.checked_sub_days(Days::new(1));
        }
        if let Some(caps) = self.days_ago.captures(&lower) {
            let days = caps.get(1)?.as_str().parse::<u64>().ok()?;
            return today.checked_sub_days(Days::new(days));
        }
        // "an hour ago", "a few minutes ago"
        if lower.split_whitespace().any(|word| word == "ago") {
            return Some(today);
        }

        self.formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
    }
}
