use super::config::BrowserConfig;
use super::PageFetcher;
use crate::models::PageFetchResult;
use headless_chrome::util::Timeout;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::error::Error as StdError;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

// Override navigator properties that give automation away
const STEALTH_SCRIPT: &str = r#"
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined
    });
    Object.defineProperty(navigator, 'languages', {
        get: () => ['en-IN', 'en']
    });
"#;

/// A single Chrome instance with one tab, reused for every page of a run
pub struct BrowserSession {
    browser: Option<Browser>,
    tab: Option<Arc<Tab>>,
    config: BrowserConfig,
}

impl BrowserSession {
    /// Launch Chrome and open the tab used for all navigation
    pub fn open(config: BrowserConfig) -> Result<Self, BrowserError> {
        let args = config.launch_args();
        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some(config.window_size))
            .args(args.iter().map(OsStr::new).collect())
            .build()
            .map_err(|e| BrowserError::Configuration(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| BrowserError::SessionCreation(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::SessionCreation(e.to_string()))?;
        tab.set_default_timeout(config.wait_timeout());

        log::info!(
            "Browser session opened (headless: {}, marker: {})",
            config.headless,
            config.marker_selector
        );

        Ok(Self {
            browser: Some(browser),
            tab: Some(tab),
            config,
        })
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Navigate, wait for the marker element, let the page settle and return its HTML
    pub fn load_page(&self, url: &str) -> Result<String, BrowserError> {
        let tab = self.tab.as_ref().ok_or(BrowserError::Closed)?;

        tab.navigate_to(url)
            .map_err(|e| navigation_error(url, "navigating to", &*e))?;
        tab.wait_until_navigated()
            .map_err(|e| navigation_error(url, "waiting for", &*e))?;

        if let Err(e) = tab.evaluate(STEALTH_SCRIPT, false) {
            log::debug!("Stealth script failed on {}: {}", url, e);
        }

        self.wait_for_marker(tab)?;

        let settle = self.config.settle_delay();
        if !settle.is_zero() {
            std::thread::sleep(settle);
        }

        tab.get_content()
            .map_err(|e| BrowserError::HtmlExtraction(e.to_string()))
    }

    /// Poll for the marker selector until it exists or the wait timeout elapses
    fn wait_for_marker(&self, tab: &Tab) -> Result<(), BrowserError> {
        let selector = &self.config.marker_selector;
        let timeout = self.config.wait_timeout();
        let script = format!(
            r#"document.querySelector('{}') !== null"#,
            selector.replace('\'', "\\'")
        );
        let start = Instant::now();

        loop {
            if let Ok(result) = tab.evaluate(&script, false) {
                if result.value.and_then(|v| v.as_bool()) == Some(true) {
                    return Ok(());
                }
            }

            if start.elapsed() >= timeout {
                return Err(BrowserError::Timeout(format!(
                    "{} after {}s",
                    selector,
                    timeout.as_secs()
                )));
            }

            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Close the tab and shut the browser down
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(tab) = self.tab.take() {
            if let Err(e) = tab.close(true) {
                log::debug!("Tab close failed: {}", e);
            }
        }
        if let Some(browser) = self.browser.take() {
            drop(browser);
            log::info!("Browser session closed");
        }
    }
}

/// Timeouts from the browser become `Timeout`, everything else `Navigation`
fn navigation_error(url: &str, stage: &str, err: &(dyn StdError + 'static)) -> BrowserError {
    if err.is::<Timeout>() {
        BrowserError::Timeout(format!("navigation to {}", url))
    } else {
        BrowserError::Navigation(format!("Failed {} {}: {}", stage, url, err))
    }
}

impl PageFetcher for BrowserSession {
    fn fetch(&mut self, url: &str) -> PageFetchResult {
        match self.load_page(url) {
            Ok(html) => Some(html),
            Err(BrowserError::Timeout(what)) => {
                log::warn!("Timed out waiting for page to load: {} ({})", url, what);
                None
            }
            Err(e) => {
                log::error!("Error occurred while getting page source: {}", e);
                None
            }
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.release();
    }
}

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser session could not be created: {0}")]
    SessionCreation(String),

    #[error("Browser configuration error: {0}")]
    Configuration(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("HTML extraction error: {0}")]
    HtmlExtraction(String),

    #[error("Browser session already closed")]
    Closed,
}
