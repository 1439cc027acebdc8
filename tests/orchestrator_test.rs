mod common;

use async_trait::async_trait;
use common::*;
use review_scraper::app::ports::ReportOutputPort;
use review_scraper::infra::FileReportOutputAdapter;
use review_scraper::pipeline::{run_crawlers, Orchestrator};
use review_scraper::types::{
    ReviewApi, ReviewRecord, ReviewSource, RunResult, ScrapeRequest, SourceSelection,
};

struct StubApi {
    name: &'static str,
    source: ReviewSource,
    count: usize,
}

#[async_trait]
impl ReviewApi for StubApi {
    fn api_name(&self) -> &'static str {
        self.name
    }

    fn source(&self) -> ReviewSource {
        self.source
    }

    async fn scrape(&self) -> Vec<ReviewRecord> {
        (0..self.count)
            .map(|i| {
                ReviewRecord::new(
                    format!("{} #{}", self.name, i),
                    "body",
                    "2024-01-10",
                    4.0,
                    self.source,
                    "https://example.com",
                )
            })
            .collect()
    }
}

fn stub(name: &'static str, source: ReviewSource, count: usize) -> Box<dyn ReviewApi> {
    Box::new(StubApi { name, source, count })
}

#[tokio::test]
async fn test_all_sources_concatenate_in_invocation_order() {
    let request = slack_2024();
    let result = run_crawlers(
        &request,
        "all",
        vec![
            stub("g2", ReviewSource::G2, 2),
            stub("capterra", ReviewSource::Capterra, 1),
            stub("trustradius", ReviewSource::TrustRadius, 0),
        ],
    )
    .await;

    assert_eq!(result.metadata.total_reviews, 3);
    assert_eq!(result.reviews.len(), 3);
    let titles: Vec<&str> = result.reviews.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["g2 #0", "g2 #1", "capterra #0"]);
    assert_eq!(result.metadata.source, "all");
    assert_eq!(result.metadata.company_name, "Slack");
    assert_eq!(result.metadata.start_date.as_deref(), Some("2024-01-01"));
    assert_eq!(result.metadata.end_date.as_deref(), Some("2024-12-31"));
    assert!(result.metadata.execution_time_seconds >= 0.0);
}

#[tokio::test]
async fn test_failing_source_does_not_stop_the_others() {
    let http = ScriptedHttp::new()
        .fail("https://www.g2.com/products/slack/reviews?page=1", "timed out")
        .page(
            "https://www.capterra.com/p/slack/reviews/",
            &listing(&[capterra_review("C", "capterra body", "2024-05-05", Some("4"))]),
        )
        .page(
            "https://www.trustradius.com/products/slack/reviews",
            &listing(&[trustradius_review("tr body", "2024-05-06")]),
        );
    let h = harness(http);

    let result = Orchestrator::new(h.ctx.clone())
        .run(&slack_2024(), SourceSelection::All)
        .await;

    let sources: Vec<ReviewSource> = result.reviews.iter().map(|r| r.source).collect();
    assert_eq!(sources, vec![ReviewSource::Capterra, ReviewSource::TrustRadius]);
    assert_eq!(result.metadata.total_reviews, 2);
    assert_eq!(
        h.http.requested_urls(),
        vec![
            "https://www.g2.com/products/slack/reviews?page=1",
            "https://www.capterra.com/p/slack/reviews/",
            "https://www.trustradius.com/products/slack/reviews",
        ]
    );
}

#[tokio::test]
async fn test_single_source_selection_only_runs_that_adapter() {
    let h = harness(ScriptedHttp::new());

    let result = Orchestrator::new(h.ctx.clone())
        .run(&slack_2024(), SourceSelection::TrustRadius)
        .await;

    assert!(result.reviews.is_empty());
    assert_eq!(result.metadata.source, "trustradius");
    assert_eq!(
        h.http.requested_urls(),
        vec!["https://www.trustradius.com/products/slack/reviews"]
    );
}

#[tokio::test]
async fn test_window_excludes_dates_after_end() {
    let http = ScriptedHttp::new().page(
        "https://www.trustradius.com/products/slack/reviews",
        &listing(&[
            trustradius_review("January", "2024-01-20"),
            trustradius_review("February", "2024-02-15"),
        ]),
    );
    let h = harness(http);
    let request = ScrapeRequest::new(
        "Slack",
        Some("2024-01-01".to_string()),
        Some("2024-01-31".to_string()),
        false,
    );

    let result = Orchestrator::new(h.ctx.clone())
        .run(&request, SourceSelection::TrustRadius)
        .await;

    assert_eq!(result.reviews.len(), 1);
    assert_eq!(result.reviews[0].date, "2024-01-20");
}

#[test]
fn test_demo_mode_returns_fixture() {
    let request = ScrapeRequest::new("Slack", None, None, false);
    let result = Orchestrator::run_demo(&request);

    assert_eq!(result.reviews.len(), 2);
    assert_eq!(result.metadata.total_reviews, 2);
    assert_eq!(result.metadata.source, "demo");
    for review in &result.reviews {
        assert_eq!(review.source, ReviewSource::Demo);
        assert!(review.review_text.contains("Slack"));
    }
}

#[test]
fn test_demo_report_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews_output.json");
    let result = Orchestrator::run_demo(&ScrapeRequest::new("Slack", None, None, false));

    FileReportOutputAdapter::new(&path).write(&result).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 2);
    assert_eq!(value["metadata"]["source"], "demo");
    assert_eq!(value["metadata"]["total_reviews"], 2);
    assert!(value["metadata"]["start_date"].is_null());
    assert_eq!(value["reviews"][0]["source"], "demo");
    assert_eq!(value["reviews"][0]["helpful_count"], 12);

    let parsed: RunResult = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.reviews, result.reviews);
}
