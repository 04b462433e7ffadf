use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Keeps a minimum gap between consecutive requests to the same host
pub struct RateLimiter {
    delay: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: None,
        }
    }

    /// Sleep until `delay` has passed since the previous call, then record
    /// this call. The first call never waits.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            sleep_until(last + self.delay).await;
        }
        self.last_request = Some(Instant::now());
    }
}
