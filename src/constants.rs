/// Source name constants shared by the CLI, the factory and the adapters.

// Source selectors (used in CLI)
pub const G2_API: &str = "g2";
pub const CAPTERRA_API: &str = "capterra";
pub const TRUSTRADIUS_API: &str = "trustradius";
pub const ALL_SOURCES: &str = "all";
pub const DEMO_SOURCE: &str = "demo";

// Listing page templates, `{product}` is replaced with the product slug
pub const G2_REVIEWS_URL: &str = "https://www.g2.com/products/{product}/reviews";
pub const CAPTERRA_REVIEWS_URL: &str = "https://www.capterra.com/p/{product}/reviews/";
pub const TRUSTRADIUS_REVIEWS_URL: &str = "https://www.trustradius.com/products/{product}/reviews";

// Structural markers on the listing pages
pub const REVIEW_CONTAINER_SELECTOR: &str = "div.review";
pub const G2_VERIFIED_MARKER: &str = "Verified";
pub const TRUSTRADIUS_TITLE_PLACEHOLDER: &str = "TrustRadius Review";

// CLI / output defaults
pub const DEFAULT_OUTPUT_FILE: &str = "reviews_output.json";
pub const DEFAULT_CONFIG_FILE: &str = "review_scraper.toml";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;
pub const DEFAULT_MIN_DELAY_SECS: f64 = 2.0;
pub const DEFAULT_MAX_DELAY_SECS: f64 = 3.0;
pub const MAX_DELAY_CEILING_SECS: f64 = 300.0;

/// Adapters in invocation order for the `all` selector
pub fn get_supported_apis() -> Vec<&'static str> {
    vec![G2_API, CAPTERRA_API, TRUSTRADIUS_API]
}

/// Fill a listing template with the product slug
pub fn listing_url(template: &str, product_slug: &str) -> String {
    template.replace("{product}", product_slug)
}
