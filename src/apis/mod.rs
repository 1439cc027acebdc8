pub mod base;
pub mod capterra;
pub mod factory;
pub mod g2;
pub mod trustradius;

pub use base::AdapterContext;
pub use capterra::CapterraCrawler;
pub use factory::{create_crawler, create_crawlers};
pub use g2::G2Crawler;
pub use trustradius::TrustRadiusCrawler;
