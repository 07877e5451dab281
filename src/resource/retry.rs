//! Backoff decisions for transient failures.
//!
//! Some failures say nothing about the request itself: the runtime simply
//! ran out of sockets or descriptors. Those are worth repeating after a
//! pause; everything else is surfaced as-is. The decision here is a pure
//! function of the error text and the attempt count so it can be tested
//! without timers.

use std::time::Duration;

use crate::api::client::INSUFFICIENT_RESOURCES;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Default ceiling on retries per request sequence.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Which errors are retried, how long to wait, and how often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Text that marks an error as transient
    pub signature: String,
    /// Delay before retry 0; doubled for every later attempt
    pub base_delay: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            signature: INSUFFICIENT_RESOURCES.to_string(),
            base_delay: DEFAULT_BASE_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Result of consulting a `RetryPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryDecision {
    pub should_retry: bool,
    pub delay: Duration,
}

impl RetryDecision {
    pub fn give_up() -> Self {
        Self {
            should_retry: false,
            delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    pub fn new(signature: impl Into<String>, base_delay: Duration, max_attempts: u32) -> Self {
        Self {
            signature: signature.into(),
            base_delay,
            max_attempts,
        }
    }

    /// Policy that never retries anything.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 0,
            ..Default::default()
        }
    }

    /// Whether `error` carries the transient signature.
    ///
    /// Case and `_`/space differences are ignored, so `ERR_INSUFFICIENT_RESOURCES`
    /// and "insufficient resources" both match the default signature.
    pub fn matches(&self, error: &str) -> bool {
        let needle = normalize(&self.signature);
        let needle = needle.strip_prefix("err ").unwrap_or(&needle);
        !needle.is_empty() && normalize(error).contains(needle)
    }

    /// `base_delay * 2^attempt`, saturating.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }

    /// Decide whether attempt number `attempt` (0-indexed) should be scheduled.
    pub fn decide(&self, error: Option<&str>, attempt: u32) -> RetryDecision {
        match error {
            Some(error) if attempt < self.max_attempts && self.matches(error) => RetryDecision {
                should_retry: true,
                delay: self.delay_for(attempt),
            },
            _ => RetryDecision::give_up(),
        }
    }
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace('_', " ")
}

/// Retry bookkeeping for one logical request sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    /// Retries already scheduled in this sequence
    pub attempt: u32,
    pub max_attempts: u32,
}

impl RetryState {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempt: 0,
            max_attempts,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempt >= self.max_attempts
    }
}

/// Where a retry sequence currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPhase {
    /// No retry pending
    #[default]
    Idle,
    /// A retry timer is armed
    Scheduled { attempt: u32, delay: Duration },
    /// A retry is running the operation
    Invoking { attempt: u32 },
    /// Attempts exhausted; the last error stays visible
    GivenUp,
}

impl RetryPhase {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, RetryPhase::Scheduled { .. })
    }
}
