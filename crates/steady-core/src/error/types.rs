//! Core error types and traits for Steady

use std::time::Duration;
use thiserror::Error;

/// Result type alias for Steady operations
pub type SteadyResult<T> = Result<T, SteadyError>;

/// Unified error trait that all Steady errors implement.
///
/// This trait ensures consistent error handling across crates by providing:
/// - error_code(): Unique code for programmatic error identification
/// - message(): Human-readable error message
/// - context(): Optional additional context
/// - is_retryable(): Whether a new attempt could plausibly succeed
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Get optional context about the error
    fn context(&self) -> Option<&str> {
        None
    }

    /// Check if this error is retryable
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Main error type for Steady
///
/// Every failure on the request path is surfaced as one of these variants.
/// Callers can match on the variant, or use the helpers in this module
/// (`status_code`, `is_rate_limited`, `retry_after`) which look through the
/// `MaxRetriesExceeded` wrapper.
#[derive(Error, Debug, Clone)]
pub enum SteadyError {
    /// The circuit breaker denied admission; no network call was made
    #[error("Circuit breaker '{breaker}' is open; request not attempted")]
    CircuitOpen { breaker: String },

    /// The server answered with an error status
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        url: Option<String>,
    },

    /// The server answered 429 Too Many Requests
    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<Duration>,
        url: Option<String>,
    },

    /// Network-level failure (DNS, connection refused, TLS, timeout)
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        url: Option<String>,
        timeout: bool,
    },

    /// The caller cancelled the call or its deadline passed
    #[error("Request was cancelled")]
    Cancelled,

    /// The response body could not be decoded into the requested type
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        context: Option<String>,
    },

    /// The request payload could not be serialized
    #[error("Encode error: {message}")]
    Encode { message: String },

    /// The attempt budget was spent without a successful response
    #[error("Max retries exceeded after {attempts} attempts: {source}")]
    MaxRetriesExceeded {
        attempts: u32,
        #[source]
        source: Box<SteadyError>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },
}

impl SteadyError {
    /// HTTP status carried by the error, looking through retry exhaustion
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::MaxRetriesExceeded { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Whether the server throttled the call, looking through retry exhaustion
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::MaxRetriesExceeded { source, .. } => source.is_rate_limited(),
            _ => false,
        }
    }

    /// Server-advertised recovery hint, if any
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            Self::MaxRetriesExceeded { source, .. } => source.retry_after(),
            _ => None,
        }
    }

    /// The innermost error behind any retry-exhaustion wrapper
    pub fn root(&self) -> &SteadyError {
        match self {
            Self::MaxRetriesExceeded { source, .. } => source.root(),
            other => other,
        }
    }
}
