pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod observability;
pub mod pipeline;
pub mod types;

// Ports and their adapters
pub mod app;
pub mod infra;

pub use error::{Result, ScraperError};
pub use types::{ReviewApi, ReviewRecord, ReviewSource, RunMetadata, RunResult, ScrapeRequest, SourceSelection};
