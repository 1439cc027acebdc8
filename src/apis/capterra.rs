use crate::apis::base::{
    collect_containers, fetch_listing, in_requested_window, log_error, log_info, log_warning,
    product_slug, require_body, select_attr, select_text, AdapterContext, ListingFetch,
    PageExtraction,
};
use crate::constants::{listing_url, CAPTERRA_API, CAPTERRA_REVIEWS_URL, REVIEW_CONTAINER_SELECTOR};
use crate::error::Result;
use crate::normalize::{normalize_date, normalize_rating, RawRating, DEFAULT_MAX_RATING};
use crate::observability::metrics::SourcesMetrics;
use crate::types::{ReviewApi, ReviewRecord, ReviewSource, ScrapeRequest};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::instrument;

static CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse(REVIEW_CONTAINER_SELECTOR).unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".review-title").unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse(".review-text").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());
static RATING: Lazy<Selector> = Lazy::new(|| Selector::parse(".rating").unwrap());

/// Capterra listing. Single page; the site blocks bots aggressively, so an
/// empty result is the common case.
pub struct CapterraCrawler {
    request: ScrapeRequest,
    ctx: AdapterContext,
}

impl CapterraCrawler {
    pub fn new(request: ScrapeRequest, ctx: AdapterContext) -> Self {
        Self { request, ctx }
    }

    pub fn listing_url(&self) -> String {
        listing_url(CAPTERRA_REVIEWS_URL, &product_slug(&self.request.company_name))
    }

    fn extract_page(&self, html: &str, url: &str) -> PageExtraction {
        let document = Html::parse_document(html);
        collect_containers(CAPTERRA_API, document.select(&CONTAINER), |block| {
            self.extract_review(block, url)
        })
    }

    fn extract_review(&self, block: &ElementRef, url: &str) -> Result<Option<ReviewRecord>> {
        let (Some(title), Some(body), Some(datetime)) = (
            select_text(block, &TITLE),
            select_text(block, &BODY),
            select_attr(block, &TIME, "datetime"),
        ) else {
            return Ok(None);
        };

        let Some(date) = normalize_date(&datetime) else {
            return Ok(None);
        };
        if !in_requested_window(&self.request, &date) {
            return Ok(None);
        }

        let body = require_body(CAPTERRA_API, body)?;
        // Rating lives in the label text, not an attribute
        let rating = match select_text(block, &RATING) {
            Some(text) => RawRating::Text(text),
            None => RawRating::Number(0.0),
        };
        let rating = normalize_rating(&rating, DEFAULT_MAX_RATING);

        Ok(Some(ReviewRecord::new(
            title,
            body,
            date,
            rating,
            ReviewSource::Capterra,
            url,
        )))
    }
}

#[async_trait::async_trait]
impl ReviewApi for CapterraCrawler {
    fn api_name(&self) -> &'static str {
        CAPTERRA_API
    }

    fn source(&self) -> ReviewSource {
        ReviewSource::Capterra
    }

    #[instrument(skip(self), fields(company = %self.request.company_name))]
    async fn scrape(&self) -> Vec<ReviewRecord> {
        log_info(
            &self.request,
            &format!("Starting Capterra scrape for {}", self.request.company_name),
        );

        let url = self.listing_url();
        let html = match fetch_listing(&self.ctx, CAPTERRA_API, &url, true).await {
            ListingFetch::Page(html) => html,
            ListingFetch::Status(status) => {
                log_warning(&format!("Capterra returned status code {}", status));
                return Vec::new();
            }
            ListingFetch::Transport(e) => {
                log_error(&format!("Capterra request failed: {}", e));
                return Vec::new();
            }
        };

        let extracted = self.extract_page(&html, &url);
        if extracted.containers == 0 {
            log_warning("No reviews found or page blocked by Capterra");
            return Vec::new();
        }
        let reviews = extracted.records;

        self.ctx.pacer.pause().await;
        SourcesMetrics::record_reviews_collected(CAPTERRA_API, reviews.len());
        log_info(
            &self.request,
            &format!("Capterra scrape completed. Reviews collected: {}", reviews.len()),
        );
        reviews
    }
}
