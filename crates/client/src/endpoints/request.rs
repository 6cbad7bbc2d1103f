//! Retry helper for HTTP requests with exponential backoff.
//!
//! Throttled and transiently unavailable responses (429, 502, 503, 504) are
//! retried with a 2^attempt second backoff (1s, 2s, 4s, ...). Every other
//! non-success status becomes [`ClientError::ApiError`] immediately.

use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Sends a request, retrying throttled or unavailable responses.
///
/// `endpoint` and `method` label the recorded metrics. `max_retries` counts
/// retries after the first attempt; 0 sends exactly once.
///
/// # Errors
///
/// Returns `MaxRetriesExceeded` when every attempt got a retryable status,
/// `ApiError` for any other non-success status, and `HttpError` for
/// transport failures.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let result = send_with_retry_inner(builder, max_retries, endpoint, method, metrics).await;
    if let (Err(e), Some(m)) = (&result, metrics) {
        m.record_client_error(endpoint, method, e);
    }
    result
}

async fn send_with_retry_inner(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let mut last_status = 0;

    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                return send_once(builder, endpoint, method, metrics).await;
            }
        };

        if attempt > 0
            && let Some(m) = metrics
        {
            m.record_retry(endpoint, method, attempt);
        }

        let response = send_once(attempt_builder, endpoint, method, metrics).await;
        match response {
            Err(ClientError::ApiError { status, .. })
                if ClientError::is_retryable_status(status) && attempt < max_retries =>
            {
                last_status = status;
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    endpoint,
                    status,
                    attempt = attempt + 1,
                    max_attempts = max_retries + 1,
                    backoff_secs,
                    "Retryable status, backing off"
                );
                tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
            }
            Err(ClientError::ApiError { status, .. })
                if ClientError::is_retryable_status(status) && max_retries > 0 =>
            {
                debug!(
                    endpoint,
                    attempts = attempt + 1,
                    "Max retries exhausted for retryable status"
                );
                return Err(ClientError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_status: status,
                });
            }
            other => {
                if attempt > 0 && other.is_ok() {
                    debug!(endpoint, attempt = attempt + 1, "Request succeeded after retry");
                }
                return other;
            }
        }
    }

    Err(ClientError::MaxRetriesExceeded {
        attempts: max_retries + 1,
        last_status,
    })
}

/// One attempt: send, time it, and turn non-success statuses into errors.
async fn send_once(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }
    let started = Instant::now();
    let sent = builder.send().await;

    let status = sent.as_ref().ok().map(|r| r.status().as_u16());
    if let Some(m) = metrics {
        m.record_request_duration(endpoint, method, started.elapsed(), status);
    }

    let response = sent?;
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let reason = response
        .status()
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    Err(ClientError::ApiError {
        status,
        url,
        message: error_message(&body).unwrap_or(reason),
        request_id,
    })
}

/// `error` or `message` from a JSON error body, else the trimmed body text.
fn error_message(body: &str) -> Option<String> {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) {
        let message = ["error", "message", "details"]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str));
        if let Some(message) = message {
            return Some(message.to_string());
        }
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
