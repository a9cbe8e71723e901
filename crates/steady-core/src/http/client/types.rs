//! HTTP client type definitions

use crate::config::ClientConfig;
use crate::http::transport::Transport;
use std::fmt;
use std::sync::Arc;

/// Resilient JSON-over-HTTP client.
///
/// Every call goes through one executor that applies the circuit breaker,
/// the retry loop and response sanitization. Cloning is cheap and clones
/// share the transport and the breaker.
#[derive(Clone)]
pub struct Client {
    pub(super) config: ClientConfig,
    pub(super) transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
