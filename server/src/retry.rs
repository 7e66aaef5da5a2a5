//! Retry with Exponential Backoff
//!
//! Generic at-least-once execution for fallible async operations. The delay
//! starts at `initial_delay` and doubles after every failed attempt. There is
//! no jitter and no circuit breaker. Which errors are worth retrying is
//! decided by a classification hook; [`retry_with_backoff`] retries all of
//! them.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Retry limits for one wrapped operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Create a policy. A `max_attempts` of zero is treated as one.
    #[must_use]
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
        }
    }

    /// Delay before retry number `retry_index` (0-based): `initial_delay * 2^retry_index`.
    #[must_use]
    pub fn delay_for(&self, retry_index: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(retry_index.min(31)))
    }
}

/// Run `op` until it succeeds or the policy gives up, retrying every error.
///
/// The last error is returned unchanged.
pub async fn retry_with_backoff<T, E, F, Fut>(policy: &RetryPolicy, label: &str, op: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_if(policy, label, |_| true, op).await
}

/// Run `op` until it succeeds, the policy gives up, or `is_retryable` rejects an error.
pub async fn retry_if<T, E, F, Fut, C>(
    policy: &RetryPolicy,
    label: &str,
    is_retryable: C,
    mut op: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && is_retryable(&e) => {
                let delay = policy.delay_for(attempt - 1);
                warn!(
                    operation = label,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Operation failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
