//! Browser automation for the JavaScript-rendered results pages
//!
//! A [`BrowserSession`] owns one headless-capable Chrome instance and a single
//! tab. Pages are fetched through the [`PageFetcher`] trait so the fetch loop
//! can run against a real browser or a canned set of pages.
//!
//! # Example
//!
//! ```no_run
//! use rust_job_scraper::browser::{BrowserConfig, BrowserSession, PageFetcher};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = BrowserSession::open(BrowserConfig::default())?;
//!
//! if let Some(html) = session.fetch("https://in.indeed.com/jobs?q=rust&l=pune&start=0") {
//!     println!("Extracted {} bytes of HTML", html.len());
//! }
//!
//! session.close();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod session;

pub use config::BrowserConfig;
pub use session::{BrowserError, BrowserSession};

use crate::models::PageFetchResult;

/// Anything that can turn a URL into rendered HTML
pub trait PageFetcher {
    /// Fetch a page, returning `None` on timeout or navigation failure
    fn fetch(&mut self, url: &str) -> PageFetchResult;
}
