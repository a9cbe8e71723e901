//! Persisted settings, as read from the config file and environment

use crate::config::client_config::ClientConfig;
use crate::config::timeouts::{network, retry};
use crate::error::{SteadyError, SteadyResult};
use crate::recovery::{BackoffPolicy, CircuitBreaker, CircuitBreakerConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Name given to the breaker built from settings
pub const DEFAULT_BREAKER_NAME: &str = "steady";

/// Top-level settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub retry: RetrySettings,
    pub circuit_breaker: BreakerSettings,
}

/// `[api]` table
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: Option<String>,
    pub token: Option<String>,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout: network::http_request_timeout(),
            user_agent: None,
        }
    }
}

/// `[retry]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub enabled: bool,
    pub max_retries: u32,
    pub retryable_statuses: Vec<u16>,
    #[serde(flatten)]
    pub backoff: BackoffPolicy,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: retry::MAX_RETRIES,
            retryable_statuses: retry::RETRYABLE_STATUSES.to_vec(),
            backoff: BackoffPolicy::default(),
        }
    }
}

/// `[circuit_breaker]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerSettings {
    pub enabled: bool,
    #[serde(flatten)]
    pub config: CircuitBreakerConfig,
}

impl Settings {
    /// Build a client configuration. Base URL and token must be present.
    pub fn to_client_config(&self) -> SteadyResult<ClientConfig> {
        let base_url = self.api.base_url.as_deref().ok_or_else(|| {
            SteadyError::config_with_context(
                "No API base URL configured",
                "Set api.base_url in the config file or STEADY_API_URL",
            )
        })?;
        let token = self.api.token.as_deref().ok_or_else(|| {
            SteadyError::config_with_context(
                "No API token configured",
                "Set api.token in the config file or STEADY_API_TOKEN",
            )
        })?;

        let mut config = ClientConfig::new(base_url, token)
            .with_timeout(self.api.timeout)
            .with_retries(self.retry.enabled)
            .with_max_retries(self.retry.max_retries)
            .with_retryable_statuses(self.retry.retryable_statuses.clone())
            .with_backoff(self.retry.backoff.clone());

        if let Some(user_agent) = &self.api.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        if self.circuit_breaker.enabled {
            config = config.with_circuit_breaker(Arc::new(CircuitBreaker::with_config(
                DEFAULT_BREAKER_NAME,
                self.circuit_breaker.config.clone(),
            )));
        }

        config.validate()?;
        Ok(config)
    }

    /// Copy of the settings that is safe to print
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api.token.is_some() {
            copy.api.token = Some("<redacted>".to_string());
        }
        copy
    }
}
