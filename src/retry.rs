//! Retry on rate limiting
//!
//! TestRail Cloud throttles per instance and answers `429 Too Many Requests`
//! with a `Retry-After` header in seconds. Only POSTs go through this policy.

use std::fmt;
use std::time::Duration;

use crate::error::Result;
use crate::response::Response;

/// Number of attempts made for a POST by default
pub const DEFAULT_MAX_ATTEMPTS: usize = 2;

/// Delay used when a 429 carries no usable `Retry-After`
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_secs(1);

/// Blocks the calling thread between attempts
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// `std::thread::sleep`, the production sleeper
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for std::sync::Arc<S> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// How often and how long to back off on 429
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    fallback_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy; fewer than one attempt is treated as one
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            fallback_delay: DEFAULT_FALLBACK_DELAY,
        }
    }

    /// Set the delay used when `Retry-After` is missing or unreadable
    pub fn fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    /// Get the attempt bound
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Run `attempt` until it yields something other than 429 or the bound is
    /// reached
    ///
    /// The last response is returned unchanged, even when it is still a 429.
    /// Transport errors end the loop immediately.
    pub fn execute<F>(&self, sleeper: &dyn Sleeper, mut attempt: F) -> Result<Response>
    where
        F: FnMut() -> Result<Response>,
    {
        let mut response = attempt()?;
        for retry in 1..self.max_attempts {
            if !response.is_rate_limited() {
                break;
            }
            let delay = self.delay_for(&response);
            tracing::warn!(
                retry,
                max_attempts = self.max_attempts,
                delay_ms = delay.as_millis() as u64,
                "TestRail answered 429, backing off"
            );
            sleeper.sleep(delay);
            response = attempt()?;
        }
        Ok(response)
    }

    /// The server supplied delay, or the fallback
    pub fn delay_for(&self, response: &Response) -> Duration {
        match parse_retry_after(response) {
            Some(delay) => delay,
            None => {
                tracing::debug!(
                    fallback_ms = self.fallback_delay.as_millis() as u64,
                    "429 without a usable Retry-After header"
                );
                self.fallback_delay
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

/// `Retry-After` in seconds (integer or decimal), converted to a duration
pub fn parse_retry_after(response: &Response) -> Option<Duration> {
    response
        .header_str("retry-after")
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .map(|seconds| Duration::from_millis((seconds * 1000.0) as u64))
}

impl fmt::Debug for dyn Sleeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sleeper")
    }
}
