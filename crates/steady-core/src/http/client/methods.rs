//! Caller-facing request methods
//!
//! Every method funnels into [`Client::execute`] or the raw executor, so all
//! of them share the same retry, breaker and sanitization behaviour.

use super::types::Client;
use crate::error::{SteadyError, SteadyResult};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

impl Client {
    /// `GET path`, decoding the JSON response.
    ///
    /// Returns `Ok(None)` when the response body is empty.
    pub async fn get<T>(&self, cancel: &CancellationToken, path: &str) -> SteadyResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.execute::<(), T>(cancel, Method::GET, path, None).await
    }

    /// `POST path` with a JSON body
    pub async fn post<B, T>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        body: &B,
    ) -> SteadyResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(cancel, Method::POST, path, Some(body)).await
    }

    /// `PATCH path` with a JSON body
    pub async fn patch<B, T>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        body: &B,
    ) -> SteadyResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(cancel, Method::PATCH, path, Some(body)).await
    }

    /// `PUT path` with a JSON body
    pub async fn put<B, T>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        body: &B,
    ) -> SteadyResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(cancel, Method::PUT, path, Some(body)).await
    }

    /// `DELETE path`; any response body is discarded
    pub async fn delete(&self, cancel: &CancellationToken, path: &str) -> SteadyResult<()> {
        self.execute_raw(cancel, Method::DELETE, path, None)
            .await
            .map(|_| ())
    }

    /// Issue a request and return the sanitized response bytes as-is.
    ///
    /// An empty response yields an empty vector.
    pub async fn do_raw(
        &self,
        cancel: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> SteadyResult<Vec<u8>> {
        let payload = encode_body(body)?;
        self.execute_raw(cancel, method, path, payload).await
    }

    /// Execute one logical call.
    ///
    /// The body is serialized once and reused by every attempt. The response
    /// is decoded into `T` unless it is empty.
    ///
    /// # Errors
    ///
    /// - [`SteadyError::CircuitOpen`] when the breaker denies admission
    /// - [`SteadyError::Api`] / [`SteadyError::RateLimited`] for error statuses
    /// - [`SteadyError::MaxRetriesExceeded`] once the attempt budget is spent
    /// - [`SteadyError::Cancelled`] when `cancel` fires
    /// - [`SteadyError::Encode`] / [`SteadyError::Decode`] for JSON problems
    pub async fn execute<B, T>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> SteadyResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = encode_body(body)?;
        let raw = self.execute_raw(cancel, method, path, payload).await?;
        decode_body(&raw)
    }
}

fn encode_body<B>(body: Option<&B>) -> SteadyResult<Option<Arc<[u8]>>>
where
    B: Serialize + ?Sized,
{
    body.map(|body| {
        serde_json::to_vec(body)
            .map(Arc::from)
            .map_err(|e| SteadyError::encode(format!("Failed to serialize request body: {}", e)))
    })
    .transpose()
}

fn decode_body<T>(raw: &[u8]) -> SteadyResult<Option<T>>
where
    T: DeserializeOwned,
{
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(raw).map(Some).map_err(|e| {
        SteadyError::decode_with_context(
            format!("Failed to decode response body: {}", e),
            format!("line {}, column {}", e.line(), e.column()),
        )
    })
}
