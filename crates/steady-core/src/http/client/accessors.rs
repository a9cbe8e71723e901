//! Client accessor methods

use super::types::Client;
use crate::config::ClientConfig;
use crate::recovery::CircuitBreaker;
use crate::recovery::circuit_breaker::{CircuitBreakerStats, CircuitState};
use std::sync::Arc;

impl Client {
    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Attached circuit breaker, if any
    pub fn circuit_breaker(&self) -> Option<&Arc<CircuitBreaker>> {
        self.config.circuit_breaker()
    }

    /// Current breaker state, or `None` without a breaker
    pub fn circuit_state(&self) -> Option<CircuitState> {
        self.circuit_breaker().map(|cb| cb.state())
    }

    /// Breaker statistics, or `None` without a breaker
    pub fn circuit_breaker_stats(&self) -> Option<CircuitBreakerStats> {
        self.circuit_breaker().map(|cb| cb.stats())
    }

    /// Whether the breaker is currently open
    pub fn is_circuit_open(&self) -> bool {
        self.circuit_state() == Some(CircuitState::Open)
    }

    /// Force the breaker closed. No-op without a breaker.
    pub fn reset_circuit_breaker(&self) {
        if let Some(breaker) = self.circuit_breaker() {
            breaker.reset();
        }
    }
}
