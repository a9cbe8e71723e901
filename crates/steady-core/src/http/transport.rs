//! Transport seam between the executor and the network
//!
//! The executor only ever talks to a [`Transport`], so the retry loop can be
//! driven by a scripted fake in tests.

use crate::error::{SteadyError, SteadyResult};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

/// One outbound HTTP attempt
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// Marshaled once per logical call and shared by every attempt
    pub body: Option<Arc<[u8]>>,
}

/// A fully read HTTP response
#[derive(Debug, Clone, Default)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Sends a single request and reads the whole response.
///
/// Implementations report network-level failures as
/// [`SteadyError::Transport`]; any HTTP status is a successful send.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> SteadyResult<TransportResponse>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport enforcing `timeout` on every request
    pub fn new(timeout: Duration, user_agent: &str) -> SteadyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                SteadyError::config_with_context(
                    format!("Failed to create HTTP client: {}", e),
                    "Building the reqwest transport",
                )
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> SteadyResult<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body.to_vec());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, &request.url))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, &request.url))?;

        Ok(TransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

/// Map a reqwest failure to a transport error, keeping the cause chain.
///
/// Requests reqwest refuses to build (an unparseable URL, say) never reached
/// the network and come back as configuration errors.
fn transport_error(error: reqwest::Error, url: &str) -> SteadyError {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    if error.is_builder() {
        SteadyError::config_with_context(message, format!("Building request for {}", url))
    } else if error.is_timeout() {
        SteadyError::transport_timeout(message, Some(url.to_string()))
    } else {
        SteadyError::transport_with_url(message, url)
    }
}
