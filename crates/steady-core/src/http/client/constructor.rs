//! Client construction

use super::types::Client;
use crate::config::settings::DEFAULT_BREAKER_NAME;
use crate::config::{ClientConfig, circuit_breaker_enabled};
use crate::error::SteadyResult;
use crate::http::transport::{ReqwestTransport, Transport};
use crate::recovery::CircuitBreaker;
use std::sync::Arc;
use tracing::debug;

impl Client {
    /// Create a client talking to the network through reqwest.
    ///
    /// The per-call timeout and user agent from `config` are applied to the
    /// underlying HTTP client. If `STEADY_CIRCUIT_BREAKER` is truthy and no
    /// breaker was supplied, a default one is attached.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` does not validate or the HTTP
    /// client cannot be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use steady_core::config::ClientConfig;
    /// use steady_core::http::Client;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::new(ClientConfig::new("https://api.example.com", "token"))?;
    /// assert_eq!(client.config().max_attempts(), 4);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: ClientConfig) -> SteadyResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout(), config.user_agent())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> SteadyResult<Self> {
        Self::build(config, transport, circuit_breaker_enabled())
    }

    pub(super) fn build(
        mut config: ClientConfig,
        transport: Arc<dyn Transport>,
        env_breaker: bool,
    ) -> SteadyResult<Self> {
        config.validate()?;

        if env_breaker && config.circuit_breaker().is_none() {
            debug!(breaker = DEFAULT_BREAKER_NAME, "attaching circuit breaker from environment");
            config = config.with_circuit_breaker(Arc::new(CircuitBreaker::new(DEFAULT_BREAKER_NAME)));
        }

        debug!(
            base_url = %config.base_url(),
            timeout_secs = config.timeout().as_secs_f64(),
            max_attempts = config.max_attempts(),
            circuit_breaker = config.circuit_breaker().is_some(),
            "created http client"
        );

        Ok(Self { config, transport })
    }
}
