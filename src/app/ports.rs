use crate::error::Result;
use crate::types::RunResult;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

// Fetch-side ports
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// GET `url` with the given extra headers. `Err` means transport failure;
    /// any HTTP status, success or not, comes back as `Ok`.
    async fn get(&self, url: &str, headers: &[(String, String)]) -> std::result::Result<HttpGetResult, String>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpGetResult {
    pub status: u16,
    pub body: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of identification strings for outgoing requests
pub trait UserAgentPort: Send + Sync {
    fn next_user_agent(&self) -> String;
}

/// Pause inserted between listing fetches
#[async_trait]
pub trait PacerPort: Send + Sync {
    async fn pause(&self) -> Duration;
}

// Output-side ports
pub trait ReportOutputPort: Send + Sync {
    /// Persist the run and return where it was written
    fn write(&self, result: &RunResult) -> Result<PathBuf>;
}
