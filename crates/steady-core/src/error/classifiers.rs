//! Error classification functions for user-friendly messages

use super::user_messages::ErrorCategory;

/// Classify an HTTP status returned by the API
pub(super) fn classify_status(status: u16) -> (ErrorCategory, String, Vec<String>) {
    match status {
        401 => (
            ErrorCategory::Authentication,
            "Authentication required".to_string(),
            vec![
                "Check that your API token is correct".to_string(),
                "Set STEADY_API_TOKEN or pass --token".to_string(),
            ],
        ),
        403 => (
            ErrorCategory::Authentication,
            "Access denied".to_string(),
            vec![
                "You may not have permission for this resource".to_string(),
                "Check the scopes granted to your API token".to_string(),
            ],
        ),
        404 => (
            ErrorCategory::Client,
            "Resource not found".to_string(),
            vec!["Verify the path or identifier is correct".to_string()],
        ),
        429 => (
            ErrorCategory::RateLimit,
            "Too many requests".to_string(),
            vec![
                "Wait a moment and try again".to_string(),
                "Consider reducing request frequency".to_string(),
            ],
        ),
        500..=599 => (
            ErrorCategory::Server,
            "Server error".to_string(),
            vec![
                "The server encountered an error".to_string(),
                "Try again in a few moments".to_string(),
            ],
        ),
        _ => (
            ErrorCategory::Client,
            "Request rejected".to_string(),
            vec!["Review the request path and payload".to_string()],
        ),
    }
}

/// Classify a transport failure from its message
pub(super) fn classify_transport(message: &str, timeout: bool) -> (String, Vec<String>) {
    let message_lower = message.to_lowercase();

    if timeout || message_lower.contains("timed out") {
        (
            "Request timed out".to_string(),
            vec![
                "Check your internet connection".to_string(),
                "Raise the request timeout if the endpoint is slow".to_string(),
            ],
        )
    } else if message_lower.contains("dns") || message_lower.contains("resolve") {
        (
            "Could not resolve host".to_string(),
            vec!["Verify the base URL is correct".to_string()],
        )
    } else if message_lower.contains("certificate") || message_lower.contains("tls") {
        (
            "Secure connection failed".to_string(),
            vec!["Check the server certificate and system clock".to_string()],
        )
    } else {
        (
            "Connection failed".to_string(),
            vec![
                "Check your internet connection".to_string(),
                "Verify the base URL is correct".to_string(),
            ],
        )
    }
}
