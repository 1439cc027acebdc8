use crate::apis::base::{
    collect_containers, fetch_listing, in_requested_window, log_error, log_info, log_warning,
    product_slug, require_body, select_text, AdapterContext, ListingFetch, PageExtraction,
};
use crate::constants::{
    listing_url, G2_API, G2_REVIEWS_URL, G2_VERIFIED_MARKER, REVIEW_CONTAINER_SELECTOR,
};
use crate::error::Result;
use crate::normalize::{normalize_date, normalize_rating, RawRating, DEFAULT_MAX_RATING};
use crate::observability::metrics::SourcesMetrics;
use crate::types::{ReviewApi, ReviewRecord, ReviewSource, ScrapeRequest};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::instrument;

static CONTAINER: Lazy<Selector> = Lazy::new(|| Selector::parse(REVIEW_CONTAINER_SELECTOR).unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".review-title").unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse(".review-body").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse(".date").unwrap());

/// G2 listing, paginated with `?page=N` until an empty page
pub struct G2Crawler {
    request: ScrapeRequest,
    ctx: AdapterContext,
}

impl G2Crawler {
    pub fn new(request: ScrapeRequest, ctx: AdapterContext) -> Self {
        Self { request, ctx }
    }

    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}?page={}",
            listing_url(G2_REVIEWS_URL, &product_slug(&self.request.company_name)),
            page
        )
    }

    fn extract_page(&self, html: &str, url: &str) -> PageExtraction {
        let document = Html::parse_document(html);
        collect_containers(G2_API, document.select(&CONTAINER), |block| {
            self.extract_review(block, url)
        })
    }

    fn extract_review(&self, block: &ElementRef, url: &str) -> Result<Option<ReviewRecord>> {
        let (Some(title), Some(body), Some(date_text)) = (
            select_text(block, &TITLE),
            select_text(block, &BODY),
            select_text(block, &DATE),
        ) else {
            return Ok(None);
        };

        let Some(date) = normalize_date(&date_text) else {
            return Ok(None);
        };
        if !in_requested_window(&self.request, &date) {
            return Ok(None);
        }

        let body = require_body(G2_API, body)?;
        let rating = normalize_rating(
            &RawRating::from(block.value().attr("data-rating")),
            DEFAULT_MAX_RATING,
        );
        let verified = block.text().collect::<String>().contains(G2_VERIFIED_MARKER);

        let mut record = ReviewRecord::new(title, body, date, rating, ReviewSource::G2, url);
        record.verified_reviewer = verified;
        Ok(Some(record))
    }
}

#[async_trait::async_trait]
impl ReviewApi for G2Crawler {
    fn api_name(&self) -> &'static str {
        G2_API
    }

    fn source(&self) -> ReviewSource {
        ReviewSource::G2
    }

    #[instrument(skip(self), fields(company = %self.request.company_name))]
    async fn scrape(&self) -> Vec<ReviewRecord> {
        let mut reviews = Vec::new();
        let mut page: u32 = 1;

        log_info(
            &self.request,
            &format!("Starting G2 scrape for {}", self.request.company_name),
        );

        loop {
            if let Some(max_pages) = self.ctx.g2_max_pages {
                if page > max_pages {
                    log_info(&self.request, &format!("Reached G2 page limit ({})", max_pages));
                    break;
                }
            }

            let url = self.page_url(page);
            let html = match fetch_listing(&self.ctx, G2_API, &url, true).await {
                ListingFetch::Page(html) => html,
                ListingFetch::Status(status) => {
                    log_warning(&format!("Non-200 status code: {}", status));
                    break;
                }
                ListingFetch::Transport(e) => {
                    log_error(&format!("Request failed: {}", e));
                    break;
                }
            };

            let extracted = self.extract_page(&html, &url);
            if extracted.containers == 0 {
                log_info(&self.request, "No more reviews found on G2");
                break;
            }
            reviews.extend(extracted.records);

            self.ctx.pacer.pause().await;
            page += 1;
        }

        SourcesMetrics::record_reviews_collected(G2_API, reviews.len());
        log_info(
            &self.request,
            &format!("G2 scrape completed. Reviews collected: {}", reviews.len()),
        );
        reviews
    }
}
