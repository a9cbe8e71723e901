//! Steady Core Library
//!
//! A resilient JSON-over-HTTP client: every outbound call is wrapped with a
//! bounded retry loop honoring `Retry-After`, an optional circuit breaker
//! shared across calls, and repair of malformed control characters in JSON
//! responses.

pub mod config;
pub mod error;
pub mod http;
pub mod recovery;

// Re-export commonly used types
pub use config::{ClientConfig, Settings};
pub use error::{ErrorCategory, SteadyError, SteadyResult, UnifiedError, UserFriendlyError};
pub use http::{Client, Transport, TransportRequest, TransportResponse, cancel_after, sanitize_json};
pub use recovery::{
    BackoffPolicy, CircuitBreaker, CircuitBreakerConfig, CircuitState, counts_as_failure,
    error_counts_as_failure,
};
pub use tokio_util::sync::CancellationToken;
pub use reqwest::Method;
