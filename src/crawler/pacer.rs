//! Request pacing
//!
//! Detail pages are fetched one at a time with a fixed pause between the end
//! of one request and the start of the next. The pause applies whether the
//! previous request succeeded or failed. It is not adaptive.

use std::time::{Duration, Instant};

/// Fixed-delay pacer for outbound requests
#[derive(Debug, Clone)]
pub struct Pacer {
    /// Minimum gap between the end of one request and the next
    delay: Duration,

    /// When the previous request finished
    last_completed: Option<Instant>,
}

impl Pacer {
    /// Creates a pacer that enforces `delay` between requests
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_completed: None,
        }
    }

    /// Time left before the next request may start
    ///
    /// Returns `None` when a request may start immediately.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        let last = self.last_completed?;
        let elapsed = now.saturating_duration_since(last);
        (elapsed < self.delay).then(|| self.delay - elapsed)
    }

    /// Waits until the configured delay has passed since the last request
    pub async fn wait_turn(&self) {
        if let Some(wait) = self.time_until_ready(Instant::now()) {
            tracing::trace!("Pacing: waiting {:?} before next request", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Records that a request attempt just finished
    pub fn record_attempt(&mut self) {
        self.last_completed = Some(Instant::now());
    }
}
