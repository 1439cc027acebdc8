//! Per-source scrape metrics.
//!
//! Recording always goes through the `metrics` facade; nothing is exported
//! unless [`init_metrics`] installed a Prometheus recorder.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Once;
use tracing::{info, warn};

static INIT: Once = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricName {
    PagesFetched,
    FetchErrors,
    ReviewsCollected,
    ItemsSkipped,
    PageFetchDuration,
    RunDuration,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::PagesFetched => "review_scraper_pages_fetched_total",
            MetricName::FetchErrors => "review_scraper_fetch_errors_total",
            MetricName::ReviewsCollected => "review_scraper_reviews_collected_total",
            MetricName::ItemsSkipped => "review_scraper_items_skipped_total",
            MetricName::PageFetchDuration => "review_scraper_page_fetch_duration_seconds",
            MetricName::RunDuration => "review_scraper_run_duration_seconds",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install the Prometheus exporter when an address is configured.
/// Must be called from inside the tokio runtime. Idempotent.
pub fn init_metrics(addr: Option<&str>) {
    let Some(addr) = addr else {
        return;
    };
    INIT.call_once(|| {
        let addr: SocketAddr = match addr.parse() {
            Ok(addr) => addr,
            Err(e) => {
                warn!("Invalid metrics address '{}': {}", addr, e);
                return;
            }
        };
        match metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
        {
            Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
            Err(e) => warn!("Failed to install Prometheus exporter: {}", e),
        }
    });
}

/// Metrics for listing fetches and extraction, labelled by source
pub struct SourcesMetrics;

impl SourcesMetrics {
    pub fn record_page_fetched(source: &'static str, duration_secs: f64) {
        ::metrics::counter!(MetricName::PagesFetched.as_str(), "source" => source).increment(1);
        ::metrics::histogram!(MetricName::PageFetchDuration.as_str(), "source" => source)
            .record(duration_secs);
    }

    pub fn record_fetch_error(source: &'static str, kind: &'static str) {
        ::metrics::counter!(MetricName::FetchErrors.as_str(), "source" => source, "kind" => kind)
            .increment(1);
    }

    pub fn record_reviews_collected(source: &'static str, count: usize) {
        ::metrics::counter!(MetricName::ReviewsCollected.as_str(), "source" => source)
            .increment(count as u64);
    }

    pub fn record_item_skipped(source: &'static str) {
        ::metrics::counter!(MetricName::ItemsSkipped.as_str(), "source" => source).increment(1);
    }

    pub fn record_run_duration(duration_secs: f64) {
        ::metrics::histogram!(MetricName::RunDuration.as_str()).record(duration_secs);
    }
}
