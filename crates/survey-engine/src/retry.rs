//! Bounded retry for transient collaborator failures
//!
//! Fixed attempt count with exponential delay, wrapped around the
//! abstract fetch operations and decoupled from the orchestrator's own
//! state machine.

use std::future::Future;
use std::time::Duration;

/// Bounded exponential-backoff retry policy
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    max_attempts: u32,
    /// Delay before the first retry; doubles per attempt
    initial_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` is floored at one
    #[inline]
    #[must_use]
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }

    /// Run `operation` until it succeeds or attempts are exhausted
    ///
    /// Returns the last error when every attempt fails.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut delay = self.initial_delay;
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    /// Three attempts, one second initial delay
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}
