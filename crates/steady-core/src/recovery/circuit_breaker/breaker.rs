//! Circuit breaker implementation

use parking_lot::RwLock;
use std::time::Instant;

use super::types::{Admission, CircuitBreakerConfig, CircuitBreakerStats, CircuitState, Clock, system_clock};

/// State guarded by the breaker lock. State and counter always change together.
#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    consecutive_failures: u32,
    last_failure: Option<Instant>,
    total_successes: u64,
    total_failures: u64,
}

impl BreakerInner {
    fn closed() -> Self {
        Self {
            state: CircuitState::Closed,
            consecutive_failures: 0,
            last_failure: None,
            total_successes: 0,
            total_failures: 0,
        }
    }
}

/// Circuit breaker shared by every call a client makes.
///
/// ```text
/// Closed   --threshold consecutive failures-->  Open
/// Open     --cooldown elapsed, on admission-->  HalfOpen (one probe)
/// HalfOpen --success-->                         Closed
/// HalfOpen --failure-->                         Open
/// ```
///
/// All transitions happen under one write lock; introspection takes the read
/// lock. None of the methods can fail.
pub struct CircuitBreaker {
    /// Component name (for logging)
    name: String,
    config: CircuitBreakerConfig,
    inner: RwLock<BreakerInner>,
    clock: Clock,
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("inner", &*self.inner.read())
            .finish()
    }
}

impl CircuitBreaker {
    /// Create a new circuit breaker with default config
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, CircuitBreakerConfig::default())
    }

    /// Create a new circuit breaker with custom config
    pub fn with_config(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self::with_clock(name, config, system_clock())
    }

    /// Create a circuit breaker that reads time from `clock`
    pub fn with_clock(name: impl Into<String>, mut config: CircuitBreakerConfig, clock: Clock) -> Self {
        // a zero threshold would open on the first failure anyway
        config.failure_threshold = config.failure_threshold.max(1);
        Self {
            name: name.into(),
            config,
            inner: RwLock::new(BreakerInner::closed()),
            clock,
        }
    }

    /// Get the component name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the configuration
    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Ask for admission of one call.
    ///
    /// Closed always admits. Open admits only once the cooldown since the last
    /// failure has elapsed, and that admission itself moves the breaker to
    /// HalfOpen so concurrent callers cannot all launch probes. HalfOpen admits
    /// nothing further until the probe's outcome is recorded.
    pub fn allow_request(&self) -> bool {
        self.admit().is_admitted()
    }

    /// Same as [`allow_request`](Self::allow_request), but tells the caller
    /// whether it holds the recovery probe.
    ///
    /// A probe holder must eventually call [`record_success`](Self::record_success),
    /// [`record_failure`](Self::record_failure) or
    /// [`abandon_probe`](Self::abandon_probe).
    pub fn admit(&self) -> Admission {
        if self.inner.read().state == CircuitState::Closed {
            return Admission::Admitted;
        }

        let mut inner = self.inner.write();
        match inner.state {
            CircuitState::Closed => Admission::Admitted,
            CircuitState::HalfOpen => Admission::Rejected,
            CircuitState::Open => {
                let now = (self.clock)();
                let cooled_down = inner
                    .last_failure
                    .map_or(true, |at| now.saturating_duration_since(at) >= self.config.cooldown);
                if !cooled_down {
                    return Admission::Rejected;
                }
                inner.state = CircuitState::HalfOpen;
                tracing::info!(
                    circuit = %self.name,
                    "Circuit breaker transitioning to half-open"
                );
                Admission::Probe
            }
        }
    }

    /// Give up a probe without an outcome.
    ///
    /// HalfOpen goes back to Open and the cooldown restarts, so a later call
    /// can probe again. Counters are left alone. No-op in any other state.
    pub fn abandon_probe(&self) {
        let now = (self.clock)();
        let mut inner = self.inner.write();
        if inner.state != CircuitState::HalfOpen {
            return;
        }
        inner.state = CircuitState::Open;
        inner.last_failure = Some(now);
        tracing::warn!(
            circuit = %self.name,
            "Circuit breaker probe abandoned, reopening"
        );
    }

    /// Record a successful call. Always leaves the breaker Closed with a zero counter.
    pub fn record_success(&self) {
        let mut inner = self.inner.write();
        let previous = inner.state;
        inner.state = CircuitState::Closed;
        inner.consecutive_failures = 0;
        inner.total_successes += 1;

        if previous != CircuitState::Closed {
            tracing::info!(
                circuit = %self.name,
                from = %previous,
                "Circuit breaker closed"
            );
        }
    }

    /// Record a failed call
    pub fn record_failure(&self) {
        let now = (self.clock)();
        let mut inner = self.inner.write();
        inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
        inner.last_failure = Some(now);
        inner.total_failures += 1;

        match inner.state {
            CircuitState::Closed => {
                if inner.consecutive_failures >= self.config.failure_threshold {
                    inner.state = CircuitState::Open;
                    tracing::warn!(
                        circuit = %self.name,
                        failures = inner.consecutive_failures,
                        cooldown_ms = self.config.cooldown.as_millis() as u64,
                        "Circuit breaker opened"
                    );
                }
            }
            CircuitState::HalfOpen => {
                // the probe failed; one failure is enough
                inner.state = CircuitState::Open;
                tracing::warn!(
                    circuit = %self.name,
                    "Circuit breaker probe failed, reopening"
                );
            }
            CircuitState::Open => {}
        }
    }

    /// Get the current state
    pub fn state(&self) -> CircuitState {
        self.inner.read().state
    }

    /// Get the consecutive failure count
    pub fn consecutive_failures(&self) -> u32 {
        self.inner.read().consecutive_failures
    }

    /// Get circuit breaker statistics
    pub fn stats(&self) -> CircuitBreakerStats {
        let inner = self.inner.read();
        CircuitBreakerStats {
            state: inner.state,
            consecutive_failures: inner.consecutive_failures,
            total_successes: inner.total_successes,
            total_failures: inner.total_failures,
            last_failure: inner.last_failure,
        }
    }

    /// Force the breaker closed and forget the last failure
    pub fn reset(&self) {
        let mut inner = self.inner.write();
        inner.state = CircuitState::Closed;
        inner.consecutive_failures = 0;
        inner.last_failure = None;

        tracing::info!(circuit = %self.name, "Circuit breaker reset");
    }
}
