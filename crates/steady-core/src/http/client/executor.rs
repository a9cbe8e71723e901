//! The request executor: breaker admission, attempt loop, outcome recording

use super::error_body::server_message;
use super::types::Client;
use crate::error::{SteadyError, SteadyResult};
use crate::http::sanitize::sanitize_json;
use crate::http::transport::{TransportRequest, TransportResponse};
use crate::recovery::backoff::retry_after_header;
use crate::recovery::{Admission, CircuitBreaker, counts_as_failure};
use chrono::Utc;
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

const JSON_MEDIA_TYPE: &str = "application/json";

/// What a single attempt decided
#[derive(Debug)]
enum AttemptOutcome {
    /// 2xx/3xx; carries the sanitized body
    Success(Vec<u8>),
    /// Worth another attempt if budget remains
    Retry {
        error: SteadyError,
        headers: Option<HeaderMap>,
    },
    /// Terminal for this logical call
    Fail(SteadyError),
}

/// A breaker admission that has to be settled with the call's outcome.
///
/// Dropped unsettled (the caller abandoned the future), a probe gives its
/// slot back so the breaker cannot stay HalfOpen.
struct Permit<'a> {
    breaker: &'a CircuitBreaker,
    probe: bool,
    settled: bool,
}

impl<'a> Permit<'a> {
    fn acquire(breaker: &'a CircuitBreaker) -> Option<Self> {
        let probe = match breaker.admit() {
            Admission::Rejected => return None,
            Admission::Admitted => false,
            Admission::Probe => true,
        };
        Some(Self {
            breaker,
            probe,
            settled: false,
        })
    }

    fn settle(mut self, failed: bool) {
        self.settled = true;
        if failed {
            self.breaker.record_failure();
        } else {
            self.breaker.record_success();
        }
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        if !self.settled && self.probe {
            debug!(breaker = %self.breaker.name(), "probe call dropped before completing");
            self.breaker.abandon_probe();
        }
    }
}

impl Client {
    /// Run one logical call and return the sanitized response body.
    ///
    /// The breaker (if attached) is consulted once before the first attempt
    /// and told about the final outcome exactly once afterwards. A call
    /// dropped mid-flight records nothing, except that an abandoned probe
    /// reopens the breaker.
    #[instrument(
        skip_all,
        fields(method = %method, path = %path, has_body = body.is_some())
    )]
    pub(super) async fn execute_raw(
        &self,
        cancel: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<Arc<[u8]>>,
    ) -> SteadyResult<Vec<u8>> {
        let permit = match self.config.circuit_breaker() {
            Some(breaker) => match Permit::acquire(breaker) {
                Some(permit) => Some(permit),
                None => {
                    debug!(breaker = %breaker.name(), "circuit open, request rejected");
                    return Err(SteadyError::circuit_open(breaker.name()));
                }
            },
            None => None,
        };

        let outcome = self.run_attempts(cancel, method, path, body).await;

        if let Some(permit) = permit {
            permit.settle(counts_as_failure(&outcome));
        }

        outcome
    }

    async fn run_attempts(
        &self,
        cancel: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<Arc<[u8]>>,
    ) -> SteadyResult<Vec<u8>> {
        let url = self.config.url_for(path);
        let headers = self.request_headers()?;
        let max_attempts = self.config.max_attempts();

        let mut last_failure: Option<SteadyError> = None;
        let mut last_headers: Option<HeaderMap> = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let delay = self
                    .config
                    .backoff()
                    .delay_for(attempt - 1, last_headers.as_ref());
                if let Some(reason) = &last_failure {
                    warn!(
                        attempt = attempt,
                        max_attempts = max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        reason = %reason,
                        "retrying after failure"
                    );
                }
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(SteadyError::Cancelled),
                    _ = sleep(delay) => {}
                }
            }

            let request = TransportRequest {
                method: method.clone(),
                url: url.clone(),
                headers: headers.clone(),
                body: body.clone(),
            };

            let started = Instant::now();
            let sent = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SteadyError::Cancelled),
                sent = self.transport.send(request) => sent,
            };
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match &sent {
                Ok(response) => debug!(
                    method = %method,
                    url = %url,
                    attempt = attempt,
                    status = response.status,
                    elapsed_ms = elapsed_ms,
                    "attempt completed"
                ),
                Err(error) => debug!(
                    method = %method,
                    url = %url,
                    attempt = attempt,
                    elapsed_ms = elapsed_ms,
                    error = %error,
                    "attempt failed"
                ),
            }

            match self.classify_attempt(sent, &url) {
                AttemptOutcome::Success(body) => return Ok(body),
                AttemptOutcome::Fail(error) => return Err(error),
                AttemptOutcome::Retry { error, headers } => {
                    last_failure = Some(error);
                    last_headers = headers;
                }
            }
        }

        let last = last_failure
            .unwrap_or_else(|| SteadyError::transport_with_url("no attempt was made", &url));
        if max_attempts > 1 {
            warn!(attempts = max_attempts, error = %last, "all retry attempts exhausted");
            Err(SteadyError::max_retries_exceeded(max_attempts, last))
        } else {
            Err(last)
        }
    }

    /// Decide what one attempt means for the loop
    fn classify_attempt(
        &self,
        sent: SteadyResult<TransportResponse>,
        url: &str,
    ) -> AttemptOutcome {
        let response = match sent {
            Ok(response) => response,
            Err(error @ SteadyError::Transport { .. }) => {
                return AttemptOutcome::Retry {
                    error,
                    headers: None,
                };
            }
            Err(error) => return AttemptOutcome::Fail(error),
        };

        let TransportResponse {
            status,
            headers,
            body,
        } = response;
        let body = sanitize_json(&body).into_owned();

        if self.config.retries_enabled() && self.config.is_retryable_status(status) {
            return AttemptOutcome::Retry {
                error: self.status_error(status, &headers, &body, url),
                headers: Some(headers),
            };
        }

        if status >= 400 {
            return AttemptOutcome::Fail(self.status_error(status, &headers, &body, url));
        }

        AttemptOutcome::Success(body)
    }

    /// Structured error for an unsuccessful status
    fn status_error(&self, status: u16, headers: &HeaderMap, body: &[u8], url: &str) -> SteadyError {
        let message = server_message(status, body);
        if status == 429 {
            let retry_after = retry_after_header(headers)
                .map(|hint| self.config.backoff().retry_after_delay(hint, Utc::now()));
            return SteadyError::RateLimited {
                message,
                retry_after,
                url: Some(url.to_string()),
            };
        }
        SteadyError::api_with_url(status, message, url)
    }

    /// Headers shared by every attempt of a call
    fn request_headers(&self) -> SteadyResult<HeaderMap> {
        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", self.config.token())).map_err(|_| {
                SteadyError::config("API token contains characters not allowed in a header")
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));
        if let Ok(user_agent) = HeaderValue::from_str(self.config.user_agent()) {
            headers.insert(USER_AGENT, user_agent);
        }
        Ok(headers)
    }
}
