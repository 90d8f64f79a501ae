//! Fixed-delay bounded retry policy
//!
//! The upstream API is paced with plain sleeps: no backoff, no jitter,
//! just "wait a fixed interval, try again, give up after N attempts".
//! Every retrying call site (register/create loop, catalog poll) shares
//! this one policy type instead of hand-rolling its own counter.

use std::time::Duration;

/// Bounded fixed-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts before giving up
    pub max_attempts: u32,
    /// Fixed pause between attempts
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts,
            retry_delay,
        }
    }

    /// Iterator over attempt numbers, 1-based
    pub fn attempts(&self) -> impl Iterator<Item = u32> {
        1..=self.max_attempts
    }

    /// True if `attempt` is the final one allowed by this policy
    pub fn is_last(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // Matches the upstream pacing the farm was tuned for
        Self::new(30, Duration::from_secs(20))
    }
}
