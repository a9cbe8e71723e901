//! Backoff between retry attempts
//!
//! A server-provided `Retry-After` hint wins over the computed exponential
//! delay. Both are capped at `max_delay`.

use crate::config::timeouts::backoff;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for backoff behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffPolicy {
    /// Delay before the first retry
    #[serde(with = "humantime_serde")]
    pub base_delay: Duration,
    /// Maximum delay between attempts
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_delay: backoff::base_delay(),
            max_delay: backoff::max_delay(),
            multiplier: backoff::MULTIPLIER,
        }
    }
}

/// A parsed `Retry-After` header value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAfter {
    /// `Retry-After: <seconds>`
    Delay(Duration),
    /// `Retry-After: <HTTP-date>`
    At(DateTime<Utc>),
}

/// Parse a `Retry-After` value: integer seconds first, then an RFC 1123 date.
///
/// Negative second counts are clamped to zero. Returns `None` for anything
/// else.
pub fn parse_retry_after(value: &str) -> Option<RetryAfter> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<i64>() {
        return Some(RetryAfter::Delay(Duration::from_secs(seconds.max(0) as u64)));
    }
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|at| RetryAfter::At(at.with_timezone(&Utc)))
}

impl BackoffPolicy {
    /// Create a policy with custom delays
    pub fn new(base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            base_delay,
            max_delay,
            ..Default::default()
        }
    }

    /// Set the multiplier. Values below 1 are treated as 1.
    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier.max(1);
        self
    }

    /// Exponential delay for the given 1-based retry number:
    /// `base_delay * multiplier^(attempt-1)`, capped at `max_delay`.
    pub fn exponential(&self, attempt: u32) -> Duration {
        let exponent = attempt.max(1) - 1;
        // a multiplier of 0 read from a config file would shrink delays to zero
        self.multiplier
            .max(1)
            .checked_pow(exponent)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Delay implied by a server hint, evaluated at `now`
    pub fn retry_after_delay(&self, hint: RetryAfter, now: DateTime<Utc>) -> Duration {
        match hint {
            RetryAfter::Delay(delay) => delay.min(self.max_delay),
            RetryAfter::At(at) => match (at - now).to_std() {
                Ok(delay) if !delay.is_zero() => delay.min(self.max_delay),
                // the date already passed
                _ => self.base_delay.min(self.max_delay),
            },
        }
    }

    /// Delay before retry number `attempt`, given the previous response headers
    pub fn delay_for(&self, attempt: u32, headers: Option<&HeaderMap>) -> Duration {
        self.delay_for_at(attempt, headers, Utc::now())
    }

    /// Same as [`delay_for`](Self::delay_for) with an explicit "now"
    pub fn delay_for_at(
        &self,
        attempt: u32,
        headers: Option<&HeaderMap>,
        now: DateTime<Utc>,
    ) -> Duration {
        headers
            .and_then(retry_after_header)
            .map(|hint| self.retry_after_delay(hint, now))
            .unwrap_or_else(|| self.exponential(attempt))
    }
}

/// Read and parse the `Retry-After` header, if present and well-formed
pub fn retry_after_header(headers: &HeaderMap) -> Option<RetryAfter> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_retry_after)
}
