//! Circuit breaker pattern for fault tolerance
//!
//! Stops a client from hammering a backend that keeps failing, and probes it
//! again once a cooldown has passed.

mod breaker;
#[cfg(test)]
mod tests;
mod types;

// Re-export all public items
pub use breaker::CircuitBreaker;
pub use types::{
    Admission, CircuitBreakerConfig, CircuitBreakerStats, CircuitState, Clock, system_clock,
};
