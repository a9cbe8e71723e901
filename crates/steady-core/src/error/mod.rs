//! Error types for Steady
//!
//! Every failure on the request path is a `SteadyError`. All variants implement
//! the `UnifiedError` trait which provides consistent fields:
//! - error_code: A unique identifier for programmatic error handling
//! - message: Human-readable error message
//! - context: Optional additional context (request URL, parse position, ...)

mod classifiers;
mod constructors;
mod conversions;
mod types;
mod unified_error;
mod user_messages;

// Re-export all public types and traits
pub use types::{SteadyError, SteadyResult, UnifiedError};
pub use user_messages::{ErrorCategory, UserFriendlyError};
