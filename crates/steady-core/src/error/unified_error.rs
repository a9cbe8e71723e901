//! UnifiedError trait implementation for SteadyError

use super::types::{SteadyError, UnifiedError};

/// Implement UnifiedError trait for SteadyError
impl UnifiedError for SteadyError {
    fn error_code(&self) -> &str {
        match self {
            Self::CircuitOpen { .. } => "STEADY_CIRCUIT_OPEN",
            Self::Api { .. } => "STEADY_API",
            Self::RateLimited { .. } => "STEADY_RATE_LIMITED",
            Self::Transport { .. } => "STEADY_TRANSPORT",
            Self::Cancelled => "STEADY_CANCELLED",
            Self::Decode { .. } => "STEADY_DECODE",
            Self::Encode { .. } => "STEADY_ENCODE",
            Self::MaxRetriesExceeded { .. } => "STEADY_MAX_RETRIES",
            Self::Config { .. } => "STEADY_CONFIG",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::CircuitOpen { .. } => "Circuit breaker is open",
            Self::Api { message, .. } => message,
            Self::RateLimited { message, .. } => message,
            Self::Transport { message, .. } => message,
            Self::Cancelled => "Request was cancelled",
            Self::Decode { message, .. } => message,
            Self::Encode { message } => message,
            Self::MaxRetriesExceeded { source, .. } => source.message(),
            Self::Config { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Api { url, .. } | Self::RateLimited { url, .. } | Self::Transport { url, .. } => {
                url.as_deref()
            }
            Self::Decode { context, .. } | Self::Config { context, .. } => context.as_deref(),
            Self::MaxRetriesExceeded { source, .. } => source.context(),
            Self::CircuitOpen { breaker } => Some(breaker),
            Self::Cancelled | Self::Encode { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => matches!(status, 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}
