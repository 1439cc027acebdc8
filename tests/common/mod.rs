#![allow(dead_code)]

use async_trait::async_trait;
use review_scraper::apis::AdapterContext;
use review_scraper::app::ports::{HttpClientPort, HttpGetResult, PacerPort};
use review_scraper::config::Config;
use review_scraper::infra::FixedUserAgent;
use review_scraper::types::ScrapeRequest;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_USER_AGENT: &str = "review-scraper-tests/1.0";

#[derive(Clone)]
enum Scripted {
    Response(u16, String),
    TransportError(String),
}

/// In-memory HTTP port. Unscripted URLs answer 404.
#[derive(Default)]
pub struct ScriptedHttp {
    responses: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl ScriptedHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, html: &str) -> Self {
        self.respond(url, 200, html)
    }

    pub fn respond(self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Scripted::Response(status, body.to_string()));
        self
    }

    pub fn fail(self, url: &str, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Scripted::TransportError(message.to_string()));
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn headers_for(&self, index: usize) -> Vec<(String, String)> {
        self.calls.lock().unwrap()[index].1.clone()
    }
}

#[async_trait]
impl HttpClientPort for ScriptedHttp {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpGetResult, String> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), headers.to_vec()));
        let scripted = self.responses.lock().unwrap().get(url).cloned();
        match scripted {
            Some(Scripted::Response(status, body)) => Ok(HttpGetResult { status, body }),
            Some(Scripted::TransportError(message)) => Err(message),
            None => Ok(HttpGetResult {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

/// Shared buffer for a `tracing_subscriber::fmt` writer
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install a WARN-level subscriber for the current thread; logs land here
    /// until the guard drops.
    pub fn warn_level(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Counts pauses instead of sleeping
#[derive(Default)]
pub struct CountingPacer {
    pauses: AtomicUsize,
}

impl CountingPacer {
    pub fn count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PacerPort for CountingPacer {
    async fn pause(&self) -> Duration {
        self.pauses.fetch_add(1, Ordering::SeqCst);
        Duration::ZERO
    }
}

pub struct Harness {
    pub http: Arc<ScriptedHttp>,
    pub pacer: Arc<CountingPacer>,
    pub ctx: AdapterContext,
}

pub fn harness(http: ScriptedHttp) -> Harness {
    harness_with_config(http, &Config::default())
}

pub fn harness_with_config(http: ScriptedHttp, config: &Config) -> Harness {
    let http = Arc::new(http);
    let pacer = Arc::new(CountingPacer::default());
    let ctx = AdapterContext::new(
        http.clone(),
        Arc::new(FixedUserAgent(TEST_USER_AGENT.to_string())),
        pacer.clone(),
        config,
    );
    Harness { http, pacer, ctx }
}

/// Request for "Slack" over the whole of 2024
pub fn slack_2024() -> ScrapeRequest {
    ScrapeRequest::new(
        "Slack",
        Some("2024-01-01".to_string()),
        Some("2024-12-31".to_string()),
        true,
    )
}

pub fn listing(containers: &[String]) -> String {
    format!(
        "<html><body><main>{}</main></body></html>",
        containers.join("\n")
    )
}

pub fn g2_review(title: &str, body: &str, date: &str, rating: Option<&str>, extra: &str) -> String {
    let rating_attr = rating
        .map(|r| format!(r#" data-rating="{}""#, r))
        .unwrap_or_default();
    format!(
        r#"<div class="review"{rating_attr}>
             <h3 class="review-title">{title}</h3>
             <div class="review-body">{body}</div>
             <span class="date">{date}</span>
             {extra}
           </div>"#
    )
}

pub fn capterra_review(title: &str, body: &str, datetime: &str, rating: Option<&str>) -> String {
    let rating_el = rating
        .map(|r| format!(r#"<span class="rating">{}</span>"#, r))
        .unwrap_or_default();
    format!(
        r#"<div class="review">
             <h3 class="review-title">{title}</h3>
             <p class="review-text">{body}</p>
             <time datetime="{datetime}">some time ago</time>
             {rating_el}
           </div>"#
    )
}

pub fn trustradius_review(body: &str, datetime: &str) -> String {
    format!(
        r#"<div class="review">
             <p>{body}</p>
             <time datetime="{datetime}"></time>
           </div>"#
    )
}
