//! Client configuration

use crate::config::timeouts::{network, retry};
use crate::error::{SteadyError, SteadyResult};
use crate::recovery::{BackoffPolicy, CircuitBreaker};
use reqwest::Url;
use reqwest::header::HeaderValue;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default `User-Agent` sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("steady/", env!("CARGO_PKG_VERSION"));

/// Settings for one `Client`.
///
/// Built with the `with_*` methods and frozen once handed to `Client::new`.
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use steady_core::config::ClientConfig;
/// use steady_core::recovery::{CircuitBreaker, CircuitBreakerConfig};
///
/// let breaker = Arc::new(CircuitBreaker::with_config(
///     "billing",
///     CircuitBreakerConfig::new(3, Duration::from_secs(10)),
/// ));
/// let config = ClientConfig::new("https://api.example.com", "token")
///     .with_max_retries(5)
///     .with_circuit_breaker(breaker);
/// assert_eq!(config.max_attempts(), 6);
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    token: String,
    timeout: Duration,
    retries_enabled: bool,
    max_retries: u32,
    backoff: BackoffPolicy,
    retryable_statuses: Vec<u16>,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
    user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("retries_enabled", &self.retries_enabled)
            .field("max_retries", &self.max_retries)
            .field("backoff", &self.backoff)
            .field("retryable_statuses", &self.retryable_statuses)
            .field(
                "circuit_breaker",
                &self.circuit_breaker.as_ref().map(|cb| cb.name().to_string()),
            )
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a config with defaults for everything but the endpoint and token
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout: network::http_request_timeout(),
            retries_enabled: true,
            max_retries: retry::MAX_RETRIES,
            backoff: BackoffPolicy::default(),
            retryable_statuses: retry::RETRYABLE_STATUSES.to_vec(),
            circuit_breaker: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Enable or disable retries
    pub fn with_retries(mut self, enabled: bool) -> Self {
        self.retries_enabled = enabled;
        self
    }

    /// Make every call a single attempt
    pub fn without_retries(self) -> Self {
        self.with_retries(false)
    }

    /// Set the number of retries after the first attempt
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Attach a circuit breaker shared by every call of the client
    pub fn with_circuit_breaker(mut self, breaker: Arc<CircuitBreaker>) -> Self {
        self.circuit_breaker = Some(breaker);
        self
    }

    /// Set the per-call timeout enforced by the transport
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the backoff policy between attempts
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Replace the set of statuses that are retried
    pub fn with_retryable_statuses(mut self, statuses: Vec<u16>) -> Self {
        self.retryable_statuses = statuses;
        self
    }

    /// Set the `User-Agent` header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check the settings that cannot be defaulted
    pub fn validate(&self) -> SteadyResult<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            SteadyError::config_with_context(
                format!("Invalid base URL '{}': {}", self.base_url, e),
                "Validating client configuration",
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SteadyError::config(format!(
                "Unsupported URL scheme '{}', expected http or https",
                url.scheme()
            )));
        }
        if self.token.trim().is_empty() {
            return Err(SteadyError::config("API token is empty"));
        }
        if HeaderValue::from_str(&format!("Bearer {}", self.token)).is_err() {
            return Err(SteadyError::config(
                "API token contains characters not allowed in a header",
            ));
        }
        if self.timeout.is_zero() {
            return Err(SteadyError::config("Request timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token sent in the `Authorization` header
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Per-call timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether retries are enabled
    pub fn retries_enabled(&self) -> bool {
        self.retries_enabled
    }

    /// Configured retry count
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Attempts one logical call may make
    pub fn max_attempts(&self) -> u32 {
        if self.retries_enabled {
            self.max_retries.saturating_add(1)
        } else {
            1
        }
    }

    /// Backoff policy between attempts
    pub fn backoff(&self) -> &BackoffPolicy {
        &self.backoff
    }

    /// Whether `status` is retried while budget remains
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Statuses that are retried
    pub fn retryable_statuses(&self) -> &[u16] {
        &self.retryable_statuses
    }

    /// Attached circuit breaker, if any
    pub fn circuit_breaker(&self) -> Option<&Arc<CircuitBreaker>> {
        self.circuit_breaker.as_ref()
    }

    /// `User-Agent` header value
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Resolve `path` against the base URL. Absolute URLs pass through.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://api.example.com", "secret");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.retries_enabled());
        assert_eq!(config.max_retries(), 3);
        assert_eq!(config.max_attempts(), 4);
        assert!(config.circuit_breaker().is_none());
        assert!(config.is_retryable_status(503));
        assert!(!config.is_retryable_status(404));
    }

    #[test]
    fn test_without_retries_is_single_attempt() {
        let config = ClientConfig::new("https://api.example.com", "secret")
            .with_max_retries(7)
            .without_retries();
        assert_eq!(config.max_attempts(), 1);
    }

    #[test]
    fn test_url_for() {
        let config = ClientConfig::new("https://api.example.com/v2/", "secret");
        assert_eq!(config.url_for("/users"), "https://api.example.com/v2/users");
        assert_eq!(config.url_for("users?page=2"), "https://api.example.com/v2/users?page=2");
        assert_eq!(
            config.url_for("https://uploads.example.com/x"),
            "https://uploads.example.com/x"
        );
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::new("https://api.example.com", "t").validate().is_ok());
        assert!(ClientConfig::new("not a url", "t").validate().is_err());
        assert!(ClientConfig::new("ftp://api.example.com", "t").validate().is_err());
        assert!(ClientConfig::new("https://api.example.com", " ").validate().is_err());
        assert!(ClientConfig::new("https://api.example.com", "tok\nen").validate().is_err());
        assert!(
            ClientConfig::new("https://api.example.com", "t")
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("https://api.example.com", "super-secret-token");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}
