use crate::apis::base::AdapterContext;
use crate::apis::capterra::CapterraCrawler;
use crate::apis::g2::G2Crawler;
use crate::apis::trustradius::TrustRadiusCrawler;
use crate::types::{ReviewApi, ReviewSource, ScrapeRequest, SourceSelection};

/// Build the adapter for a single source. `Demo` has no live adapter.
pub fn create_crawler(
    source: ReviewSource,
    request: &ScrapeRequest,
    ctx: &AdapterContext,
) -> Option<Box<dyn ReviewApi>> {
    match source {
        ReviewSource::G2 => Some(Box::new(G2Crawler::new(request.clone(), ctx.clone()))),
        ReviewSource::Capterra => Some(Box::new(CapterraCrawler::new(request.clone(), ctx.clone()))),
        ReviewSource::TrustRadius => {
            Some(Box::new(TrustRadiusCrawler::new(request.clone(), ctx.clone())))
        }
        ReviewSource::Demo => None,
    }
}

/// Adapters for a selector, in invocation order
pub fn create_crawlers(
    selection: SourceSelection,
    request: &ScrapeRequest,
    ctx: &AdapterContext,
) -> Vec<Box<dyn ReviewApi>> {
    selection
        .sources()
        .into_iter()
        .filter_map(|source| create_crawler(source, request, ctx))
        .collect()
}
