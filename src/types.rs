use crate::constants::{ALL_SOURCES, CAPTERRA_API, DEMO_SOURCE, G2_API, TRUSTRADIUS_API};
use crate::error::ScraperError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of the adapter a review came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSource {
    G2,
    Capterra,
    TrustRadius,
    Demo,
}

impl ReviewSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewSource::G2 => G2_API,
            ReviewSource::Capterra => CAPTERRA_API,
            ReviewSource::TrustRadius => TRUSTRADIUS_API,
            ReviewSource::Demo => DEMO_SOURCE,
        }
    }
}

impl fmt::Display for ReviewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review after normalization, independent of the site it was scraped from.
///
/// Field order matches the order of keys in the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub title: String,
    pub review_text: String,
    /// Canonical `YYYY-MM-DD`
    pub date: String,
    pub rating: f64,
    pub source: ReviewSource,
    pub reviewer_name: Option<String>,
    pub reviewer_title: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub verified_reviewer: bool,
    pub helpful_count: Option<u32>,
    pub review_url: String,
    pub incentivized: bool,
}

impl ReviewRecord {
    /// Record with every optional field unset, as the live adapters produce them
    pub fn new(
        title: impl Into<String>,
        review_text: impl Into<String>,
        date: impl Into<String>,
        rating: f64,
        source: ReviewSource,
        review_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            review_text: review_text.into(),
            date: date.into(),
            rating,
            source,
            reviewer_name: None,
            reviewer_title: None,
            company_size: None,
            industry: None,
            pros: None,
            cons: None,
            verified_reviewer: false,
            helpful_count: None,
            review_url: review_url.into(),
            incentivized: false,
        }
    }
}

/// Arguments every adapter is constructed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub company_name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub verbose: bool,
}

impl ScrapeRequest {
    pub fn new(
        company_name: impl Into<String>,
        start_date: Option<String>,
        end_date: Option<String>,
        verbose: bool,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            start_date,
            end_date,
            verbose,
        }
    }
}

/// Which adapters a run should invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSelection {
    G2,
    Capterra,
    TrustRadius,
    All,
}

impl SourceSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSelection::G2 => G2_API,
            SourceSelection::Capterra => CAPTERRA_API,
            SourceSelection::TrustRadius => TRUSTRADIUS_API,
            SourceSelection::All => ALL_SOURCES,
        }
    }

    /// Sources to run, in invocation order
    pub fn sources(&self) -> Vec<ReviewSource> {
        match self {
            SourceSelection::G2 => vec![ReviewSource::G2],
            SourceSelection::Capterra => vec![ReviewSource::Capterra],
            SourceSelection::TrustRadius => vec![ReviewSource::TrustRadius],
            SourceSelection::All => vec![
                ReviewSource::G2,
                ReviewSource::Capterra,
                ReviewSource::TrustRadius,
            ],
        }
    }
}

impl FromStr for SourceSelection {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            G2_API => Ok(SourceSelection::G2),
            CAPTERRA_API => Ok(SourceSelection::Capterra),
            TRUSTRADIUS_API => Ok(SourceSelection::TrustRadius),
            ALL_SOURCES => Ok(SourceSelection::All),
            _ => Err(ScraperError::InvalidSource(s.to_string())),
        }
    }
}

impl fmt::Display for SourceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run metadata written next to the reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub company_name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub source: String,
    pub total_reviews: usize,
    /// ISO-8601 UTC timestamp of the run
    pub scrape_date: String,
    pub execution_time_seconds: f64,
}

/// Everything a single invocation produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub metadata: RunMetadata,
    pub reviews: Vec<ReviewRecord>,
}

/// Core trait that all review sources must implement
#[async_trait::async_trait]
pub trait ReviewApi: Send + Sync {
    /// Unique identifier for this adapter
    fn api_name(&self) -> &'static str;

    /// Tag written into the `source` field of every record
    fn source(&self) -> ReviewSource;

    /// Fetch and normalize reviews. Never fails: problems are logged and
    /// whatever was collected so far is returned.
    async fn scrape(&self) -> Vec<ReviewRecord>;
}
