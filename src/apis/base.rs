use crate::app::ports::{HttpClientPort, PacerPort, UserAgentPort};
use crate::config::Config;
use crate::error::{Result, ScraperError};
use crate::normalize::is_in_window;
use crate::observability::metrics::SourcesMetrics;
use crate::types::{ReviewRecord, ScrapeRequest};
use scraper::{ElementRef, Selector};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Collaborators shared by every adapter in a run
#[derive(Clone)]
pub struct AdapterContext {
    pub http: Arc<dyn HttpClientPort>,
    pub user_agents: Arc<dyn UserAgentPort>,
    pub pacer: Arc<dyn PacerPort>,
    pub accept_language: String,
    pub g2_max_pages: Option<u32>,
}

impl AdapterContext {
    pub fn new(
        http: Arc<dyn HttpClientPort>,
        user_agents: Arc<dyn UserAgentPort>,
        pacer: Arc<dyn PacerPort>,
        config: &Config,
    ) -> Self {
        Self {
            http,
            user_agents,
            pacer,
            accept_language: config.http.accept_language.clone(),
            g2_max_pages: config.g2.max_pages,
        }
    }
}

/// Outcome of a single listing GET
#[derive(Debug)]
pub enum ListingFetch {
    Page(String),
    Status(u16),
    Transport(String),
}

/// What one listing page yielded
#[derive(Debug, Default)]
pub struct PageExtraction {
    pub containers: usize,
    pub records: Vec<ReviewRecord>,
}

/// Lowercase the company name and hyphenate spaces
pub fn product_slug(company_name: &str) -> String {
    company_name.to_lowercase().replace(' ', "-")
}

/// GET a listing page. With `rotate_identity` the request carries a fresh
/// user agent and the configured `Accept-Language`.
pub async fn fetch_listing(
    ctx: &AdapterContext,
    source: &'static str,
    url: &str,
    rotate_identity: bool,
) -> ListingFetch {
    let headers = if rotate_identity {
        vec![
            ("User-Agent".to_string(), ctx.user_agents.next_user_agent()),
            ("Accept-Language".to_string(), ctx.accept_language.clone()),
        ]
    } else {
        Vec::new()
    };

    debug!("GET {}", url);
    let started = Instant::now();
    match ctx.http.get(url, &headers).await {
        Ok(resp) if resp.is_success() => {
            SourcesMetrics::record_page_fetched(source, started.elapsed().as_secs_f64());
            ListingFetch::Page(resp.body)
        }
        Ok(resp) => {
            SourcesMetrics::record_fetch_error(source, "status");
            ListingFetch::Status(resp.status)
        }
        Err(e) => {
            SourcesMetrics::record_fetch_error(source, "transport");
            ListingFetch::Transport(e)
        }
    }
}

/// Run the per-container extractor over every review container, keeping the
/// records it produced. A failing container is logged and skipped.
pub fn collect_containers<'a, F>(
    source: &'static str,
    containers: impl Iterator<Item = ElementRef<'a>>,
    mut extract: F,
) -> PageExtraction
where
    F: FnMut(&ElementRef<'a>) -> Result<Option<ReviewRecord>>,
{
    let mut page = PageExtraction::default();
    for container in containers {
        page.containers += 1;
        match extract(&container) {
            Ok(Some(record)) => page.records.push(record),
            Ok(None) => SourcesMetrics::record_item_skipped(source),
            Err(e) => {
                warn!("Failed to parse a {} review: {}", source, e);
                SourcesMetrics::record_item_skipped(source);
            }
        }
    }
    page
}

/// Trimmed text of the first match of `selector` inside `element`
pub fn select_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Attribute of the first match of `selector`; empty when the attribute is missing
pub fn select_attr(element: &ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.value().attr(attr).unwrap_or_default().to_string())
}

/// Required body text; a present but blank body is an extraction error
pub fn require_body(source: &'static str, body: String) -> Result<String> {
    if body.is_empty() {
        return Err(ScraperError::MissingField(format!("{} review body is empty", source)));
    }
    Ok(body)
}

/// Date window check on the adapter's request
pub fn in_requested_window(request: &ScrapeRequest, date: &str) -> bool {
    is_in_window(date, request.start_date.as_deref(), request.end_date.as_deref())
}

/// Logging helpers; progress lines only appear for verbose runs
pub fn log_info(request: &ScrapeRequest, message: &str) {
    if request.verbose {
        info!("{}", message);
    }
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReviewSource;
    use scraper::Html;

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(product_slug("Slack"), "slack");
        assert_eq!(product_slug("Microsoft Teams"), "microsoft-teams");
        assert_eq!(product_slug("Google  Meet"), "google--meet");
    }

    #[test]
    fn collect_containers_skips_failed_items() {
        let html = Html::parse_fragment(
            r#"<div class="review">a</div><div class="review">b</div><div class="review">c</div>"#,
        );
        let selector = Selector::parse("div.review").unwrap();
        let page = collect_containers("g2", html.select(&selector), |el| {
            let text: String = el.text().collect();
            match text.as_str() {
                "a" => Ok(Some(ReviewRecord::new(
                    "t",
                    "a",
                    "2024-01-01",
                    0.0,
                    ReviewSource::G2,
                    "u",
                ))),
                "b" => Err(ScraperError::MissingField("title".to_string())),
                _ => Ok(None),
            }
        });
        assert_eq!(page.containers, 3);
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].review_text, "a");
    }

    #[test]
    fn select_helpers_trim_and_default() {
        let html = Html::parse_fragment(
            r#"<div><span class="t">  Title  </span><time>no attr</time></div>"#,
        );
        let root = html.root_element();
        let t = Selector::parse(".t").unwrap();
        let time = Selector::parse("time").unwrap();
        let missing = Selector::parse(".missing").unwrap();
        assert_eq!(select_text(&root, &t).as_deref(), Some("Title"));
        assert_eq!(select_attr(&root, &time, "datetime").as_deref(), Some(""));
        assert_eq!(select_text(&root, &missing), None);
    }

    #[test]
    fn blank_body_is_an_error() {
        assert!(require_body("capterra", String::new()).is_err());
        assert_eq!(require_body("capterra", "ok".to_string()).unwrap(), "ok");
    }
}
