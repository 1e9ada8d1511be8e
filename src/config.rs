use crate::browser::BrowserConfig;
use crate::export::{Exporter, DEFAULT_FILE_STEM, DEFAULT_OUTPUT_DIR};
use crate::helpers::{DateNormalizer, DEFAULT_DATE_FORMATS};
use crate::pacing::Pacer;
use crate::sources::indeed::{ExtractError, ListingExtractor, SelectorConfig, BASE_URL};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Page count offered as the prompt default
    pub default_pages: u32,
    pub site: SiteConfig,
    pub browser: BrowserConfig,
    pub pacing: PacingConfig,
    pub selectors: SelectorConfig,
    pub dates: DateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host that search URLs and relative job links are built on
    pub origin: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    /// Shortest pause between pages in seconds
    pub min_secs: f64,
    /// Longest pause between pages in seconds
    pub max_secs: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DateConfig {
    /// chrono formats tried for absolute "posted" dates
    pub formats: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub file_stem: String,
    /// Append a `_YYYYmmddHHMMSS` suffix to file names
    pub timestamped: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_pages: 1,
            site: SiteConfig::default(),
            browser: BrowserConfig::default(),
            pacing: PacingConfig::default(),
            selectors: SelectorConfig::default(),
            dates: DateConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: BASE_URL.to_string(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_secs: 3.0,
            max_secs: 6.0,
        }
    }
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_OUTPUT_DIR.to_string(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            timestamped: true,
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded configuration from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("{}; using default configuration", e);
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str::<Config>(&content)?)
    }

    pub fn pacer(&self) -> Pacer {
        Pacer::new(self.pacing.min_secs, self.pacing.max_secs)
    }

    pub fn exporter(&self) -> Exporter {
        Exporter::new(&self.output.dir, &self.output.file_stem, self.output.timestamped)
    }

    pub fn extractor(&self) -> Result<ListingExtractor, ExtractError> {
        ListingExtractor::with_origin(
            &self.selectors,
            &self.site.origin,
            DateNormalizer::with_formats(self.dates.formats.clone()),
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
