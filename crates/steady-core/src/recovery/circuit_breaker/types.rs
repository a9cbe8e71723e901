//! Circuit breaker types and configuration

use crate::config::timeouts::breaker;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of "now" for cooldown arithmetic
pub type Clock = Arc<dyn Fn() -> Instant + Send + Sync>;

/// Wall-clock source used outside of tests
pub fn system_clock() -> Clock {
    Arc::new(Instant::now)
}

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CircuitState {
    /// Circuit is closed, calls proceed normally
    Closed,
    /// Circuit is open, calls are rejected until the cooldown passes
    Open,
    /// A single probe call has been admitted to test recovery
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
            Self::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Result of asking the breaker to admit a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The call must not be made
    Rejected,
    /// Admitted while closed
    Admitted,
    /// Admitted as the single recovery probe; its outcome decides the state
    Probe,
}

impl Admission {
    pub fn is_admitted(self) -> bool {
        self != Self::Rejected
    }
}

/// Configuration for circuit breaker behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before opening the circuit
    pub failure_threshold: u32,
    /// Time to wait after the last failure before admitting a probe
    #[serde(with = "humantime_serde")]
    pub cooldown: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: breaker::FAILURE_THRESHOLD,
            cooldown: breaker::cooldown(),
        }
    }
}

impl CircuitBreakerConfig {
    /// Create a config with the given threshold and cooldown
    pub fn new(failure_threshold: u32, cooldown: Duration) -> Self {
        Self {
            failure_threshold,
            cooldown,
        }
    }

    /// Set the failure threshold
    pub fn with_failure_threshold(mut self, failure_threshold: u32) -> Self {
        self.failure_threshold = failure_threshold;
        self
    }

    /// Set the cooldown
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

/// Point-in-time snapshot of a circuit breaker
#[derive(Debug, Clone)]
pub struct CircuitBreakerStats {
    pub state: CircuitState,
    pub consecutive_failures: u32,
    pub total_successes: u64,
    pub total_failures: u64,
    pub last_failure: Option<Instant>,
}

impl CircuitBreakerStats {
    /// Total outcomes recorded
    pub fn total_calls(&self) -> u64 {
        self.total_successes + self.total_failures
    }

    /// Calculate failure rate as a percentage
    pub fn failure_rate(&self) -> f64 {
        let total = self.total_calls();
        if total == 0 {
            0.0
        } else {
            (self.total_failures as f64 / total as f64) * 100.0
        }
    }
}
