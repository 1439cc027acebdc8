use crate::app::ports::PacerPort;
use crate::config::PacingConfig;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Sleeps for a uniformly random duration inside the configured window
pub struct RandomDelayPacer {
    min_secs: f64,
    max_secs: f64,
}

impl RandomDelayPacer {
    pub fn new(config: &PacingConfig) -> Self {
        Self {
            min_secs: config.min_delay_secs,
            max_secs: config.max_delay_secs,
        }
    }

    fn next_delay(&self) -> Duration {
        let width = self.max_secs - self.min_secs;
        let secs = if width > 0.0 && width.is_finite() {
            rand::thread_rng().gen_range(self.min_secs..=self.max_secs)
        } else {
            self.min_secs
        };
        Duration::try_from_secs_f64(secs)
            .or_else(|_| Duration::try_from_secs_f64(self.min_secs))
            .unwrap_or(Duration::ZERO)
    }
}

#[async_trait]
impl PacerPort for RandomDelayPacer {
    async fn pause(&self) -> Duration {
        let delay = self.next_delay();
        debug!("Pausing {:.2}s before next request", delay.as_secs_f64());
        tokio::time::sleep(delay).await;
        delay
    }
}

/// Never waits; demo runs and tests
#[derive(Debug, Default, Clone)]
pub struct NoDelayPacer;

#[async_trait]
impl PacerPort for NoDelayPacer {
    async fn pause(&self) -> Duration {
        Duration::ZERO
    }
}
