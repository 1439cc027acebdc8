pub mod demo;
pub mod orchestrator;

pub use orchestrator::{run_crawlers, Orchestrator};
