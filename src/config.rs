use crate::constants::{
    DEFAULT_ACCEPT_LANGUAGE, DEFAULT_MAX_DELAY_SECS, DEFAULT_MIN_DELAY_SECS,
    DEFAULT_TIMEOUT_SECONDS, MAX_DELAY_CEILING_SECS,
};
use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub const METRICS_ADDR_ENV: &str = "REVIEW_SCRAPER_METRICS_ADDR";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub pacing: PacingConfig,
    pub g2: G2Config,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Bounds of the randomized pause between listing fetches
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay_secs: DEFAULT_MIN_DELAY_SECS,
            max_delay_secs: DEFAULT_MAX_DELAY_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct G2Config {
    /// Stop paginating after this many pages; unlimited when unset
    pub max_pages: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    pub prometheus_addr: Option<String>,
}

impl Config {
    /// Load from `path` if it exists, otherwise fall back to defaults.
    /// `.env` is read first so the metrics override can live there.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                ScraperError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Self::from_toml_str(&content)?
        } else {
            debug!("Config file {} not found, using defaults", path.display());
            Config::default()
        };

        if let Ok(addr) = std::env::var(METRICS_ADDR_ENV) {
            if !addr.trim().is_empty() {
                config.metrics.prometheus_addr = Some(addr.trim().to_string());
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 {
            return Err(ScraperError::Config(
                "http.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        let PacingConfig {
            min_delay_secs,
            max_delay_secs,
        } = self.pacing;
        if !(min_delay_secs >= 0.0
            && min_delay_secs <= max_delay_secs
            && max_delay_secs <= MAX_DELAY_CEILING_SECS)
        {
            return Err(ScraperError::Config(format!(
                "invalid pacing window {}..{} seconds",
                min_delay_secs, max_delay_secs
            )));
        }
        if self.g2.max_pages == Some(0) {
            return Err(ScraperError::Config("g2.max_pages must be at least 1".to_string()));
        }
        Ok(())
    }
}
