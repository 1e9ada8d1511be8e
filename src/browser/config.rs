use serde::Deserialize;
use std::time::Duration;

/// Flags that hide the most obvious automation signals and let Chrome run in containers
pub const STEALTH_FLAGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
];

/// Element whose presence means the result cards have rendered
pub const DEFAULT_MARKER_SELECTOR: &str = "div.job_seen_beacon";

/// Configuration for the browser session
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,

    /// Browser window size
    pub window_size: (u32, u32),

    /// Custom user agent
    pub user_agent: Option<String>,

    /// How long to wait for the marker element, in seconds
    pub wait_timeout_secs: u64,

    /// Extra delay after the marker appears, for deferred client-side rendering
    pub settle_delay_secs: u64,

    /// CSS selector that signals the page has rendered
    pub marker_selector: String,

    /// Additional Chrome flags
    pub chrome_flags: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            window_size: (1920, 1080),
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            wait_timeout_secs: 20,
            settle_delay_secs: 5,
            marker_selector: DEFAULT_MARKER_SELECTOR.to_string(),
            chrome_flags: vec![],
        }
    }
}

impl BrowserConfig {
    /// Configuration with no settle delay and a short wait, handy in tests
    pub fn quick() -> Self {
        Self {
            headless: true,
            wait_timeout_secs: 5,
            settle_delay_secs: 0,
            ..Self::default()
        }
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    /// Full list of Chrome arguments: stealth flags, user flags, then the user agent
    pub fn launch_args(&self) -> Vec<String> {
        let mut args: Vec<String> = STEALTH_FLAGS.iter().map(|f| f.to_string()).collect();
        for flag in &self.chrome_flags {
            if !args.contains(flag) {
                args.push(flag.clone());
            }
        }
        if let Some(ua) = &self.user_agent {
            args.push(format!("--user-agent={}", ua));
        }
        args
    }
}
