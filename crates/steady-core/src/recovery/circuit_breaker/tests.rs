//! Tests for circuit breaker functionality

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::time::{Duration, Instant};

    use parking_lot::Mutex;

    use super::super::breaker::CircuitBreaker;
    use super::super::types::{Admission, CircuitBreakerConfig, CircuitState, Clock};

    /// Clock that only moves when told to
    struct ManualClock {
        now: Arc<Mutex<Instant>>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Arc::new(Mutex::new(Instant::now())),
            }
        }

        fn clock(&self) -> Clock {
            let now = self.now.clone();
            Arc::new(move || *now.lock())
        }

        fn advance(&self, by: Duration) {
            *self.now.lock() += by;
        }
    }

    fn breaker(threshold: u32, cooldown: Duration, clock: &ManualClock) -> CircuitBreaker {
        CircuitBreaker::with_clock(
            "test",
            CircuitBreakerConfig::new(threshold, cooldown),
            clock.clock(),
        )
    }

    #[test]
    fn test_circuit_starts_closed() {
        let cb = CircuitBreaker::new("test");
        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.consecutive_failures(), 0);
        assert!(cb.allow_request());
    }

    #[test]
    fn test_default_config() {
        let config = CircuitBreakerConfig::default();
        assert_eq!(config.failure_threshold, 5);
        assert_eq!(config.cooldown, Duration::from_secs(30));
    }

    #[test]
    fn test_circuit_opens_exactly_at_threshold() {
        let clock = ManualClock::new();
        for threshold in 1..=6 {
            let cb = breaker(threshold, Duration::from_secs(30), &clock);
            for i in 1..threshold {
                cb.record_failure();
                assert_eq!(cb.state(), CircuitState::Closed, "opened early at failure {}", i);
            }
            cb.record_failure();
            assert_eq!(cb.state(), CircuitState::Open);
            assert_eq!(cb.consecutive_failures(), threshold);
        }
    }

    #[test]
    fn test_success_resets_counter_while_closed() {
        let clock = ManualClock::new();
        let cb = breaker(3, Duration::from_secs(30), &clock);

        cb.record_failure();
        cb.record_failure();
        cb.record_success();
        assert_eq!(cb.consecutive_failures(), 0);

        cb.record_failure();
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[test]
    fn test_open_rejects_until_cooldown() {
        let clock = ManualClock::new();
        let cb = breaker(1, Duration::from_secs(10), &clock);
        cb.record_failure();

        for _ in 0..5 {
            assert!(!cb.allow_request());
        }
        clock.advance(Duration::from_millis(9_999));
        assert!(!cb.allow_request());
        assert_eq!(cb.state(), CircuitState::Open);

        clock.advance(Duration::from_millis(1));
        assert!(cb.allow_request());
        assert_eq!(cb.state(), CircuitState::HalfOpen);

        // single probe in flight
        assert!(!cb.allow_request());
        assert!(!cb.allow_request());
    }

    #[test]
    fn test_admit_reports_probe() {
        let clock = ManualClock::new();
        let cb = breaker(1, Duration::from_secs(1), &clock);
        assert_eq!(cb.admit(), Admission::Admitted);

        cb.record_failure();
        assert_eq!(cb.admit(), Admission::Rejected);

        clock.advance(Duration::from_secs(1));
        assert_eq!(cb.admit(), Admission::Probe);
        assert_eq!(cb.admit(), Admission::Rejected);
    }

    #[test]
    fn test_abandoned_probe_reopens_and_restarts_cooldown() {
        let clock = ManualClock::new();
        let cb = breaker(1, Duration::from_secs(1), &clock);
        cb.record_failure();
        clock.advance(Duration::from_secs(1));
        assert_eq!(cb.admit(), Admission::Probe);

        cb.abandon_probe();
        assert_eq!(cb.state(), CircuitState::Open);
        let stats = cb.stats();
        assert_eq!(stats.total_failures, 1);
        assert_eq!(stats.total_successes, 0);

        clock.advance(Duration::from_millis(500));
        assert!(!cb.allow_request());
        clock.advance(Duration::from_millis(500));
        assert_eq!(cb.admit(), Admission::Probe);
    }

    #[test]
    fn test_abandon_probe_outside_half_open_is_noop() {
        let clock = ManualClock::new();
        let cb = breaker(2, Duration::from_secs(1), &clock);
        cb.record_failure();

        cb.abandon_probe();
        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.consecutive_failures(), 1);
        assert!(cb.stats().last_failure.is_some());
    }

    #[test]
    fn test_half_open_success_closes() {
        let clock = ManualClock::new();
        let cb = breaker(2, Duration::from_secs(1), &clock);
        cb.record_failure();
        cb.record_failure();
        clock.advance(Duration::from_secs(1));
        assert!(cb.allow_request());

        cb.record_success();
        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.consecutive_failures(), 0);
        assert!(cb.allow_request());
    }

    #[test]
    fn test_half_open_failure_reopens_regardless_of_threshold() {
        let clock = ManualClock::new();
        let cb = breaker(5, Duration::from_secs(1), &clock);
        for _ in 0..5 {
            cb.record_failure();
        }
        clock.advance(Duration::from_secs(2));
        assert!(cb.allow_request());
        // a success here would reset; instead the probe fails
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);

        // the failure timestamp was refreshed, so the cooldown starts over
        clock.advance(Duration::from_millis(500));
        assert!(!cb.allow_request());
        clock.advance(Duration::from_millis(500));
        assert!(cb.allow_request());
    }

    #[test]
    fn test_record_success_always_closes() {
        let clock = ManualClock::new();

        let closed = breaker(3, Duration::from_secs(1), &clock);
        closed.record_failure();
        closed.record_success();
        assert_eq!(closed.state(), CircuitState::Closed);

        let open = breaker(1, Duration::from_secs(1), &clock);
        open.record_failure();
        assert_eq!(open.state(), CircuitState::Open);
        open.record_success();
        assert_eq!(open.state(), CircuitState::Closed);
        assert_eq!(open.consecutive_failures(), 0);

        let half_open = breaker(1, Duration::from_secs(1), &clock);
        half_open.record_failure();
        clock.advance(Duration::from_secs(1));
        assert!(half_open.allow_request());
        half_open.record_success();
        assert_eq!(half_open.state(), CircuitState::Closed);
    }

    #[test]
    fn test_reset() {
        let clock = ManualClock::new();
        let cb = breaker(1, Duration::from_secs(60), &clock);
        cb.record_failure();
        assert!(!cb.allow_request());

        cb.reset();
        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.consecutive_failures(), 0);
        assert!(cb.stats().last_failure.is_none());
        assert!(cb.allow_request());
    }

    #[test]
    fn test_zero_threshold_is_treated_as_one() {
        let clock = ManualClock::new();
        let cb = breaker(0, Duration::from_secs(1), &clock);
        assert_eq!(cb.config().failure_threshold, 1);
        cb.record_failure();
        assert_eq!(cb.state(), CircuitState::Open);
    }

    #[test]
    fn test_stats() {
        let cb = CircuitBreaker::new("test");

        cb.record_success();
        cb.record_success();
        cb.record_failure();

        let stats = cb.stats();
        assert_eq!(stats.total_calls(), 3);
        assert_eq!(stats.total_failures, 1);
        assert_eq!(stats.consecutive_failures, 1);
        assert!((stats.failure_rate() - 33.33).abs() < 0.1);
    }

    #[test]
    fn test_concurrent_admission_yields_single_probe() {
        let clock = ManualClock::new();
        let cb = Arc::new(breaker(1, Duration::from_secs(5), &clock));
        cb.record_failure();
        clock.advance(Duration::from_secs(5));

        let threads = 16;
        let barrier = Arc::new(Barrier::new(threads));
        let admitted = Arc::new(AtomicUsize::new(0));

        std::thread::scope(|scope| {
            for _ in 0..threads {
                let cb = cb.clone();
                let barrier = barrier.clone();
                let admitted = admitted.clone();
                scope.spawn(move || {
                    barrier.wait();
                    if cb.allow_request() {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(admitted.load(Ordering::SeqCst), 1);
        assert_eq!(cb.state(), CircuitState::HalfOpen);
    }

    #[test]
    fn test_concurrent_failures_are_not_lost() {
        let cb = Arc::new(CircuitBreaker::with_config(
            "test",
            CircuitBreakerConfig::new(1_000, Duration::from_secs(30)),
        ));

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let cb = cb.clone();
                scope.spawn(move || {
                    for _ in 0..100 {
                        cb.record_failure();
                    }
                });
            }
        });

        assert_eq!(cb.consecutive_failures(), 800);
        assert_eq!(cb.stats().total_failures, 800);
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[test]
    fn test_config_deserializes_humantime() {
        let config: CircuitBreakerConfig =
            toml::from_str("failure_threshold = 3\ncooldown = \"45s\"").unwrap();
        assert_eq!(config.failure_threshold, 3);
        assert_eq!(config.cooldown, Duration::from_secs(45));

        let partial: CircuitBreakerConfig = toml::from_str("cooldown = \"2m\"").unwrap();
        assert_eq!(partial.failure_threshold, 5);
        assert_eq!(partial.cooldown, Duration::from_secs(120));
    }
}
