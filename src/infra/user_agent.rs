use crate::app::ports::UserAgentPort;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;

static DESKTOP_USER_AGENTS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4.1 Safari/605.1.15",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
    ]
});

/// Picks a random desktop browser identity for every request
#[derive(Debug, Default, Clone)]
pub struct RotatingUserAgents;

impl RotatingUserAgents {
    pub fn new() -> Self {
        Self
    }
}

impl UserAgentPort for RotatingUserAgents {
    fn next_user_agent(&self) -> String {
        DESKTOP_USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(DESKTOP_USER_AGENTS[0])
            .to_string()
    }
}

/// Always the same identity; for tests and reproducible runs
#[derive(Debug, Clone)]
pub struct FixedUserAgent(pub String);

impl UserAgentPort for FixedUserAgent {
    fn next_user_agent(&self) -> String {
        self.0.clone()
    }
}
