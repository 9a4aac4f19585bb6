//! Request pacing for the review feed.
//!
//! The feed service rate-limits aggressively, so callers configure a minimum
//! gap between two successive requests. The gap is a floor, not a schedule:
//! time already spent parsing and normalizing the previous page counts
//! towards it. The first request of a harvest is never delayed.

use std::time::Duration;

use tokio::time::Instant;

/// Enforces a minimum interval between successive feed requests.
///
/// One pacer lives for the whole harvest so the gap also applies between the
/// last page of one country and the first page of the next.
#[derive(Debug)]
pub struct RequestPacer {
    min_gap: Duration,
    last_request: Option<Instant>,
}

impl RequestPacer {
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            min_gap: Duration::from_millis(delay_ms),
            last_request: None,
        }
    }

    /// Sleeps until at least `min_gap` has passed since the previous call,
    /// then records the current instant as the latest request.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_gap {
                let remaining = self.min_gap - elapsed;
                tracing::debug!(
                    delay_ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
                    "pacing feed request"
                );
                tokio::time::sleep(remaining).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_wait_returns_immediately() {
        let mut pacer = RequestPacer::new(10_000);
        let started = Instant::now();
        pacer.wait().await;
        assert!(started.elapsed() < Duration::from_millis(1_000));
    }

    #[tokio::test]
    async fn successive_waits_are_spaced_by_at_least_the_delay() {
        let mut pacer = RequestPacer::new(60);
        pacer.wait().await;
        let started = Instant::now();
        pacer.wait().await;
        pacer.wait().await;
        assert!(started.elapsed() >= Duration::from_millis(120));
    }

    #[tokio::test]
    async fn zero_delay_never_sleeps() {
        let mut pacer = RequestPacer::new(0);
        let started = Instant::now();
        for _ in 0..5 {
            pacer.wait().await;
        }
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn time_spent_elsewhere_counts_towards_the_gap() {
        let mut pacer = RequestPacer::new(50);
        pacer.wait().await;
        tokio::time::sleep(Duration::from_millis(80)).await;
        let started = Instant::now();
        pacer.wait().await;
        assert!(started.elapsed() < Duration::from_millis(40));
    }
}
