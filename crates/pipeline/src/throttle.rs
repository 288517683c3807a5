use std::time::Duration;

use tokio::time::sleep;

/// Fixed minimum delay between consecutive model calls, applied after every
/// extraction attempt regardless of its outcome. No backoff, no jitter, no
/// retry: the rate budget only needs calls spaced out.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn pause(&self) {
        sleep(self.delay).await;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::from_millis(1000)
    }
}
