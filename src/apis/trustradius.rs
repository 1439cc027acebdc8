use crate::apis::base::{
    collect_containers, fetch_listing, in_requested_window, log_error, log_info, log_warning,
    product_slug, require_body, select_attr, select_text, AdapterContext, ListingFetch,
    PageExtraction,
};
use crate::constants::{
    listing_url, REVIEW_CONTAINER_SELECTOR, TRUSTRADIUS_API, TRUSTRADIUS_REVIEWS_URL,
    TRUSTRADIUS_TITLE_PLACEHOLDER,
};
use crate::error::Result;
use crate::normalize::{normalize_date, normalize_rating, RawRating, DEFAULT_MAX_RATING};
use crate::observability::metrics::SourcesMetrics;
use crate::types::{ReviewApi, ReviewRecord, ReviewSource, ScrapeRequest};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::instrument;

static CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse(REVIEW_CONTAINER_SELECTOR).unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());

/// TrustRadius listing: one page, plain request, no rating or title
pub struct TrustRadiusCrawler {
    request: ScrapeRequest,
    ctx: AdapterContext,
}

impl TrustRadiusCrawler {
    pub fn new(request: ScrapeRequest, ctx: AdapterContext) -> Self {
        Self { request, ctx }
    }

    pub fn listing_url(&self) -> String {
        listing_url(TRUSTRADIUS_REVIEWS_URL, &product_slug(&self.request.company_name))
    }

    fn extract_page(&self, html: &str, url: &str) -> PageExtraction {
        let document = Html::parse_document(html);
        collect_containers(TRUSTRADIUS_API, document.select(&CONTAINER), |block| {
            self.extract_review(block, url)
        })
    }

    fn extract_review(&self, block: &ElementRef, url: &str) -> Result<Option<ReviewRecord>> {
        let (Some(body), Some(datetime)) =
            (select_text(block, &BODY), select_attr(block, &TIME, "datetime"))
        else {
            return Ok(None);
        };

        let Some(date) = normalize_date(&datetime) else {
            return Ok(None);
        };
        if !in_requested_window(&self.request, &date) {
            return Ok(None);
        }

        let body = require_body(TRUSTRADIUS_API, body)?;
        Ok(Some(ReviewRecord::new(
            TRUSTRADIUS_TITLE_PLACEHOLDER,
            body,
            date,
            normalize_rating(&RawRating::Number(0.0), DEFAULT_MAX_RATING),
            ReviewSource::TrustRadius,
            url,
        )))
    }
}

#[async_trait::async_trait]
impl ReviewApi for TrustRadiusCrawler {
    fn api_name(&self) -> &'static str {
        TRUSTRADIUS_API
    }

    fn source(&self) -> ReviewSource {
        ReviewSource::TrustRadius
    }

    #[instrument(skip(self), fields(company = %self.request.company_name))]
    async fn scrape(&self) -> Vec<ReviewRecord> {
        log_info(
            &self.request,
            &format!("Starting TrustRadius scrape for {}", self.request.company_name),
        );

        let url = self.listing_url();
        let html = match fetch_listing(&self.ctx, TRUSTRADIUS_API, &url, false).await {
            ListingFetch::Page(html) => html,
            ListingFetch::Status(status) => {
                log_warning(&format!("TrustRadius returned status code {}", status));
                return Vec::new();
            }
            ListingFetch::Transport(e) => {
                log_error(&format!("TrustRadius request failed: {}", e));
                return Vec::new();
            }
        };

        let extracted = self.extract_page(&html, &url);
        if extracted.containers == 0 {
            log_warning("No reviews found or page blocked by TrustRadius");
            return Vec::new();
        }
        let reviews = extracted.records;

        SourcesMetrics::record_reviews_collected(TRUSTRADIUS_API, reviews.len());
        log_info(
            &self.request,
            &format!("TrustRadius scrape completed. Reviews collected: {}", reviews.len()),
        );
        reviews
    }
}
