//! Constructor methods for SteadyError

use super::types::SteadyError;
use std::time::Duration;

impl SteadyError {
    /// Create a circuit-open error for the named breaker
    pub fn circuit_open(breaker: impl Into<String>) -> Self {
        Self::CircuitOpen {
            breaker: breaker.into(),
        }
    }

    /// Create a new API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            url: None,
        }
    }

    /// Create an API error with the request URL
    pub fn api_with_url(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            url: Some(url.into()),
        }
    }

    /// Create a new rate-limited error
    pub fn rate_limited(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after,
            url: None,
        }
    }

    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            url: None,
            timeout: false,
        }
    }

    /// Create a transport error with the request URL
    pub fn transport_with_url(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            url: Some(url.into()),
            timeout: false,
        }
    }

    /// Create a transport error for a request that hit its timeout
    pub fn transport_timeout(message: impl Into<String>, url: Option<String>) -> Self {
        Self::Transport {
            message: message.into(),
            url,
            timeout: true,
        }
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            context: None,
        }
    }

    /// Create a decode error with context
    pub fn decode_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new encode error
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Wrap the last failure of a spent attempt budget
    pub fn max_retries_exceeded(attempts: u32, last: SteadyError) -> Self {
        Self::MaxRetriesExceeded {
            attempts,
            source: Box::new(last),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }
}
