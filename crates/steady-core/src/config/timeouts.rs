//! Centralized default values
//!
//! All values can be overridden via `ClientConfig`, the config file or the
//! environment.

use std::time::Duration;

/// Default values for network operations
pub mod network {
    use super::*;

    /// Default per-call timeout for HTTP requests (30 seconds)
    pub const HTTP_REQUEST_SECS: u64 = 30;

    /// Get HTTP request timeout as Duration
    pub fn http_request_timeout() -> Duration {
        Duration::from_secs(HTTP_REQUEST_SECS)
    }
}

/// Default values for the retry loop
pub mod retry {
    /// Retries after the first attempt
    pub const MAX_RETRIES: u32 = 3;

    /// Statuses that are retried while budget remains
    pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];
}

/// Default values for backoff between attempts
pub mod backoff {
    use super::*;

    /// Delay before the first retry (1 second)
    pub const BASE_DELAY_SECS: u64 = 1;

    /// Upper bound for any single delay (30 seconds)
    pub const MAX_DELAY_SECS: u64 = 30;

    /// Exponential growth factor
    pub const MULTIPLIER: u32 = 2;

    /// Get base delay as Duration
    pub fn base_delay() -> Duration {
        Duration::from_secs(BASE_DELAY_SECS)
    }

    /// Get max delay as Duration
    pub fn max_delay() -> Duration {
        Duration::from_secs(MAX_DELAY_SECS)
    }
}

/// Default values for the circuit breaker
pub mod breaker {
    use super::*;

    /// Consecutive failures before the circuit opens
    pub const FAILURE_THRESHOLD: u32 = 5;

    /// Cooldown before a probe is admitted (30 seconds)
    pub const COOLDOWN_SECS: u64 = 30;

    /// Get cooldown as Duration
    pub fn cooldown() -> Duration {
        Duration::from_secs(COOLDOWN_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_timeouts() {
        assert_eq!(network::HTTP_REQUEST_SECS, 30);
        assert_eq!(network::http_request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_backoff_defaults() {
        assert_eq!(backoff::base_delay(), Duration::from_secs(1));
        assert_eq!(backoff::max_delay(), Duration::from_secs(30));
        assert_eq!(backoff::MULTIPLIER, 2);
    }

    #[test]
    fn test_breaker_defaults() {
        assert_eq!(breaker::FAILURE_THRESHOLD, 5);
        assert_eq!(breaker::cooldown(), Duration::from_secs(30));
        assert_eq!(retry::MAX_RETRIES, 3);
    }
}
