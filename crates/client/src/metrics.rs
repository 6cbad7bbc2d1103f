//! Metrics collection for register API calls.
//!
//! This module provides metrics collection for register API calls, including:
//! - Request latency histograms
//! - Request counters (total, retries, errors)
//! - Error categorization
//! - Rows dropped because they failed to deserialize
//!
//! # What this module does NOT handle:
//! - Metrics exposition (see [`crate::metrics_exporter`])
//! - Persistent storage of metrics
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`
//! - Metric recording is infallible and never disrupts an API call
//! - Zero-cost when no metrics recorder is installed

use std::time::Duration;

use crate::error::ClientError;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "grc_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "grc_api_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "grc_api_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "grc_api_errors_total";

/// Metric name for rows skipped during deserialization.
pub const METRIC_DESERIALIZATION_FAILURES: &str = "grc_api_deserialization_failures_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Envelope-level errors (`success: false`, unexpected body shape)
    Api,
    /// Request timeout
    Timeout,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Api => "api",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Unknown => "unknown",
        }
    }

    fn from_status(status: u16) -> Self {
        match status {
            400..=499 => ErrorCategory::Http4xx,
            500..=599 => ErrorCategory::Http5xx,
            _ => ErrorCategory::Api,
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::HttpError(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::HttpError(e) if e.is_connect() || e.is_request() => {
                ErrorCategory::Transport
            }
            ClientError::HttpError(_) => ErrorCategory::Unknown,
            ClientError::ApiError { status, .. } => ErrorCategory::from_status(*status),
            ClientError::MaxRetriesExceeded { last_status, .. } => {
                ErrorCategory::from_status(*last_status)
            }
            ClientError::NotFound(_) => ErrorCategory::Http4xx,
            ClientError::Unsuccessful(_) | ClientError::InvalidResponse(_) => ErrorCategory::Api,
            ClientError::InvalidUrl(_) => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for register API calls.
///
/// A thin wrapper around the `metrics` crate macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, including retries.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry attempt (1-based).
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error, categorizing it automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record a row that was dropped because it did not match `model_type`.
    pub fn record_deserialization_failure(&self, endpoint: &str, model_type: &'static str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_DESERIALIZATION_FAILURES,
            "endpoint" => endpoint.to_string(),
            "model_type" => model_type,
        )
        .increment(1);
    }
}
