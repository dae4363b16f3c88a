//! Jittered pause between page fetches.
//!
//! The crawler waits a uniformly random duration after every non-terminal
//! page so the remote service sees an uneven, polite request rate.

use rand::Rng;
use shared::config::PacingConfig;
use std::time::Duration;
use tokio::time::sleep;

/// Random delay drawn uniformly from an inclusive millisecond range
#[derive(Debug)]
pub struct JitterDelay {
    /// Shortest pause in milliseconds
    min_ms: u64,
    /// Longest pause in milliseconds (inclusive)
    max_ms: u64,
    /// Pauses taken so far
    pauses: u64,
}

impl JitterDelay {
    /// Create a new delay over `[min, max]`
    ///
    /// A `max` below `min` is raised to `min`.
    pub fn new(min: Duration, max: Duration) -> Self {
        let min_ms = min.as_millis() as u64;
        let max_ms = (max.as_millis() as u64).max(min_ms);

        Self {
            min_ms,
            max_ms,
            pauses: 0,
        }
    }

    pub fn from_config(config: &PacingConfig) -> Self {
        Self::new(
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }

    /// Draw the next delay without waiting
    pub fn next_delay(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::thread_rng().gen_range(self.min_ms..=self.max_ms))
    }

    /// Sleep for a freshly drawn delay
    pub async fn pause(&mut self) {
        let delay = self.next_delay();
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Pausing before next page");
        sleep(delay).await;
        self.pauses += 1;
    }

    /// Number of pauses taken since creation
    pub fn pauses(&self) -> u64 {
        self.pauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_delay_within_bounds() {
        let delay = JitterDelay::new(Duration::from_secs(1), Duration::from_secs(3));

        for _ in 0..200 {
            let d = delay.next_delay();
            assert!(d >= Duration::from_secs(1));
            assert!(d <= Duration::from_secs(3));
        }
    }

    #[test]
    fn test_inverted_range_collapses_to_min() {
        let delay = JitterDelay::new(Duration::from_millis(50), Duration::from_millis(10));
        assert_eq!(delay.next_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_from_config_defaults() {
        let delay = JitterDelay::from_config(&PacingConfig::default());
        assert_eq!(delay.min_ms, 1000);
        assert_eq!(delay.max_ms, 3000);
    }

    #[tokio::test]
    async fn test_pause_sleeps_and_counts() {
        let mut delay = JitterDelay::new(Duration::from_millis(20), Duration::from_millis(40));

        let start = Instant::now();
        delay.pause().await;
        delay.pause().await;

        assert!(start.elapsed() >= Duration::from_millis(40));
        assert_eq!(delay.pauses(), 2);
    }
}
