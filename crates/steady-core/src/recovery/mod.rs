//! Recovery primitives for the HTTP client
//!
//! - Circuit breaker shared by all calls of one client
//! - Backoff calculation between attempts
//! - Classification of call outcomes for breaker accounting

pub mod backoff;
pub mod circuit_breaker;

pub use backoff::{BackoffPolicy, RetryAfter, parse_retry_after};
pub use circuit_breaker::{Admission, CircuitBreaker, CircuitBreakerConfig, CircuitState};

use crate::error::{SteadyError, SteadyResult};

/// Whether the final outcome of a logical call counts against the breaker.
///
/// One logical call (however many attempts it took) yields exactly one signal.
pub fn counts_as_failure<T>(outcome: &SteadyResult<T>) -> bool {
    match outcome {
        Ok(_) => false,
        Err(error) => error_counts_as_failure(error),
    }
}

/// Failure classification for a single error value.
///
/// Throttling, server faults and transport failures count. Requests the
/// server rejected with a 4xx do not; neither does anything unrecognised.
pub fn error_counts_as_failure(error: &SteadyError) -> bool {
    match error {
        SteadyError::RateLimited { .. } => true,
        SteadyError::Api { status, .. } if *status >= 500 => true,
        SteadyError::Api { .. } => false,
        SteadyError::Transport { .. } | SteadyError::MaxRetriesExceeded { .. } => true,
        SteadyError::CircuitOpen { .. }
        | SteadyError::Cancelled
        | SteadyError::Decode { .. }
        | SteadyError::Encode { .. }
        | SteadyError::Config { .. } => false,
    }
}
