//! User-friendly error messages and classification
//!
//! Maps each `SteadyError` to a title, the original message and a few hints.

use super::classifiers::{classify_status, classify_transport};
use super::types::{SteadyError, UnifiedError};
use std::fmt;

/// Error category for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration issues
    Configuration,
    /// Authentication/authorization failures
    Authentication,
    /// Rate limiting / quota exceeded
    RateLimit,
    /// Network connectivity issues
    Network,
    /// Server-side faults (5xx)
    Server,
    /// Requests the server rejected (4xx)
    Client,
    /// Calls blocked by the circuit breaker
    Circuit,
    /// User-initiated cancellation
    Cancellation,
    /// Internal errors (encoding, decoding)
    Internal,
}

impl ErrorCategory {
    /// Get a user-friendly category name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Configuration => "Configuration Error",
            Self::Authentication => "Authentication Error",
            Self::RateLimit => "Rate Limit Exceeded",
            Self::Network => "Network Error",
            Self::Server => "Server Error",
            Self::Client => "Request Error",
            Self::Circuit => "Service Unavailable",
            Self::Cancellation => "Cancelled",
            Self::Internal => "Internal Error",
        }
    }
}

/// What the CLI shows for a failed call
#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    pub category: ErrorCategory,
    /// One-line summary
    pub title: String,
    /// Server or transport message, as received
    pub message: String,
    /// Things the user can try, most useful first
    pub suggestions: Vec<String>,
    /// `STEADY_*` code of the outermost error
    pub error_code: String,
}

impl fmt::Display for UserFriendlyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.category.display_name())?;
        if !self.message.is_empty() {
            write!(f, "\n  {}", self.message)?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  hint: {}", suggestion)?;
        }
        Ok(())
    }
}

impl From<&SteadyError> for UserFriendlyError {
    fn from(error: &SteadyError) -> Self {
        let (category, title, message, suggestions) = describe(error);
        Self {
            category,
            title,
            message,
            suggestions,
            error_code: error.error_code().to_string(),
        }
    }
}

type Description = (ErrorCategory, String, String, Vec<String>);

fn describe(error: &SteadyError) -> Description {
    match error {
        SteadyError::CircuitOpen { breaker } => (
            ErrorCategory::Circuit,
            "Service temporarily unavailable".to_string(),
            format!(
                "Recent calls failed repeatedly, so '{}' is refusing new requests for a while",
                breaker
            ),
            vec!["Wait for the cooldown to pass and try again".to_string()],
        ),

        SteadyError::Api {
            status, message, ..
        } => {
            let (category, title, suggestions) = classify_status(*status);
            (category, title, message.clone(), suggestions)
        }

        SteadyError::RateLimited {
            message,
            retry_after,
            ..
        } => {
            let (category, title, mut suggestions) = classify_status(429);
            if let Some(delay) = retry_after {
                suggestions.insert(
                    0,
                    format!("The server asked to wait {} seconds", delay.as_secs()),
                );
            }
            (category, title, message.clone(), suggestions)
        }

        SteadyError::Transport {
            message, timeout, ..
        } => {
            let (title, suggestions) = classify_transport(message, *timeout);
            (ErrorCategory::Network, title, message.clone(), suggestions)
        }

        SteadyError::Cancelled => (
            ErrorCategory::Cancellation,
            "Request cancelled".to_string(),
            "The request was cancelled before it completed".to_string(),
            Vec::new(),
        ),

        SteadyError::Decode { message, .. } => (
            ErrorCategory::Internal,
            "Unexpected response format".to_string(),
            message.clone(),
            vec!["The server returned data in an unexpected shape".to_string()],
        ),

        SteadyError::Encode { message } => (
            ErrorCategory::Internal,
            "Request payload could not be encoded".to_string(),
            message.clone(),
            Vec::new(),
        ),

        SteadyError::MaxRetriesExceeded { attempts, source } => {
            let (category, title, message, suggestions) = describe(source);
            (
                category,
                title,
                format!("{} (gave up after {} attempts)", message, attempts),
                suggestions,
            )
        }

        SteadyError::Config { message, .. } => (
            ErrorCategory::Configuration,
            "Invalid configuration".to_string(),
            message.clone(),
            vec!["Run 'steady config show' to inspect the effective settings".to_string()],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_unauthorized_is_authentication() {
        let error = SteadyError::api(401, "token expired");
        let friendly = UserFriendlyError::from(&error);
        assert_eq!(friendly.category, ErrorCategory::Authentication);
        assert_eq!(friendly.message, "token expired");
        assert_eq!(friendly.error_code, "STEADY_API");
    }

    #[test]
    fn test_rate_limit_leads_with_server_hint() {
        let error = SteadyError::rate_limited("slow down", Some(Duration::from_secs(7)));
        let friendly = UserFriendlyError::from(&error);
        assert_eq!(friendly.category, ErrorCategory::RateLimit);
        assert!(friendly.suggestions[0].contains("7 seconds"));
    }

    #[test]
    fn test_exhausted_retries_describe_the_last_failure() {
        let error = SteadyError::max_retries_exceeded(4, SteadyError::transport("connection refused"));
        let friendly = UserFriendlyError::from(&error);
        assert_eq!(friendly.category, ErrorCategory::Network);
        assert!(friendly.message.contains("4 attempts"));
        assert_eq!(friendly.error_code, "STEADY_MAX_RETRIES");
    }

    #[test]
    fn test_display() {
        let error = SteadyError::circuit_open("api");
        let display = UserFriendlyError::from(&error).to_string();
        assert!(display.starts_with("Service temporarily unavailable (Service Unavailable)"));
        assert!(display.contains("\n  hint: Wait for the cooldown"));

        let display = UserFriendlyError::from(&SteadyError::Cancelled).to_string();
        assert!(!display.contains("hint:"));
    }
}
