use crate::apis::base::AdapterContext;
use crate::apis::factory::create_crawlers;
use crate::constants::DEMO_SOURCE;
use crate::observability::metrics::SourcesMetrics;
use crate::pipeline::demo::demo_reviews;
use crate::types::{ReviewApi, ReviewRecord, RunMetadata, RunResult, ScrapeRequest, SourceSelection};
use chrono::{SecondsFormat, Utc};
use std::time::Instant;
use tracing::{info, info_span, Instrument};

/// Runs the selected adapters one after another and wraps their output
pub struct Orchestrator {
    ctx: AdapterContext,
}

impl Orchestrator {
    pub fn new(ctx: AdapterContext) -> Self {
        Self { ctx }
    }

    /// Scrape every source in `selection`
    pub async fn run(&self, request: &ScrapeRequest, selection: SourceSelection) -> RunResult {
        let crawlers = create_crawlers(selection, request, &self.ctx);
        run_crawlers(request, selection.as_str(), crawlers).await
    }

    /// Fixed fixture instead of network access
    pub fn run_demo(request: &ScrapeRequest) -> RunResult {
        let started = Instant::now();
        let reviews = demo_reviews(&request.company_name);
        build_result(request, DEMO_SOURCE, reviews, started)
    }
}

/// Run `crawlers` strictly in order, concatenating their records.
pub async fn run_crawlers(
    request: &ScrapeRequest,
    source_label: &str,
    crawlers: Vec<Box<dyn ReviewApi>>,
) -> RunResult {
    let started = Instant::now();
    let mut reviews: Vec<ReviewRecord> = Vec::new();
    let mut per_source: Vec<(&'static str, usize)> = Vec::with_capacity(crawlers.len());

    for crawler in crawlers {
        let span = info_span!("source", api = crawler.api_name());
        let collected = crawler.scrape().instrument(span).await;
        per_source.push((crawler.api_name(), collected.len()));
        reviews.extend(collected);
    }

    for (api, count) in &per_source {
        info!("{}: {} reviews", api, count);
    }

    build_result(request, source_label, reviews, started)
}

fn build_result(
    request: &ScrapeRequest,
    source_label: &str,
    reviews: Vec<ReviewRecord>,
    started: Instant,
) -> RunResult {
    let elapsed = started.elapsed().as_secs_f64();
    SourcesMetrics::record_run_duration(elapsed);

    RunResult {
        metadata: RunMetadata {
            company_name: request.company_name.clone(),
            start_date: request.start_date.clone(),
            end_date: request.end_date.clone(),
            source: source_label.to_string(),
            total_reviews: reviews.len(),
            scrape_date: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            execution_time_seconds: round_secs(elapsed),
        },
        reviews,
    }
}

fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}
