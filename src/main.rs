use anyhow::Context;
use clap::Parser;
use review_scraper::apis::AdapterContext;
use review_scraper::app::ports::ReportOutputPort;
use review_scraper::config::Config;
use review_scraper::constants::{DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT_FILE};
use review_scraper::infra::{FileReportOutputAdapter, RandomDelayPacer, ReqwestHttp, RotatingUserAgents};
use review_scraper::logging;
use review_scraper::normalize::is_in_range;
use review_scraper::observability::metrics::init_metrics;
use review_scraper::pipeline::Orchestrator;
use review_scraper::types::{ScrapeRequest, SourceSelection};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "review_scraper")]
#[command(about = "Collect SaaS product reviews from G2, Capterra and TrustRadius")]
#[command(version = "0.1.0")]
struct Cli {
    /// Company name (e.g., Slack)
    #[arg(long)]
    company: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<String>,

    /// g2 | capterra | trustradius | all
    #[arg(long, default_value = "all")]
    source: String,

    /// Output JSON file
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Run in demo mode with mock data
    #[arg(long)]
    demo: bool,

    /// Optional TOML config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

/// Both bounds must be canonical dates in order, or every review gets filtered out
fn window_is_usable(start: Option<&str>, end: Option<&str>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => is_in_range(start, start, end),
        _ => false,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    init_metrics(config.metrics.prometheus_addr.as_deref());

    let request = ScrapeRequest::new(cli.company, cli.start_date, cli.end_date, cli.verbose);

    let result = if cli.demo {
        info!("Demo mode: using fixture reviews");
        Orchestrator::run_demo(&request)
    } else {
        let selection: SourceSelection = cli.source.parse()?;

        if !window_is_usable(request.start_date.as_deref(), request.end_date.as_deref()) {
            warn!(
                "Date window {:?}..{:?} is missing or not YYYY-MM-DD; every review will be filtered out",
                request.start_date, request.end_date
            );
        }

        let ctx = AdapterContext::new(
            Arc::new(ReqwestHttp::new(&config.http)?),
            Arc::new(RotatingUserAgents::new()),
            Arc::new(RandomDelayPacer::new(&config.pacing)),
            &config,
        );
        Orchestrator::new(ctx).run(&request, selection).await
    };

    let written = FileReportOutputAdapter::new(&cli.output).write(&result)?;
    println!(
        "Scraping completed. {} reviews saved to {}",
        result.metadata.total_reviews,
        written.display()
    );
    Ok(())
}
