//! Resilient HTTP client
//!
//! Wraps every outbound call with an optional circuit breaker, a bounded
//! retry loop honoring `Retry-After`, and repair of malformed JSON bodies.

mod accessors;
mod constructor;
mod error_body;
mod executor;
mod methods;
mod types;

pub use types::Client;
