//! Error types for the GRC register client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the register API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success status from the register API.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// A 2xx response whose envelope reported `success: false` or carried an `error`.
    #[error("Request was not successful: {0}")]
    Unsuccessful(String),

    /// Response body did not match any accepted shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({attempts} attempts, last status {last_status})")]
    MaxRetriesExceeded { attempts: usize, last_status: u16 },

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Record not found.
    #[error("Record not found: {0}")]
    NotFound(String),
}

impl ClientError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_timeout() || e.is_connect(),
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    ///
    /// Everything else fails immediately, including 500, which the register
    /// API returns for query failures.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::MaxRetriesExceeded { last_status, .. } => Some(*last_status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Short message suitable for a toast or a single stderr line.
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError {
                status, message, ..
            } => format!("Request failed ({status}): {message}"),
            Self::Unsuccessful(message) => message.clone(),
            Self::HttpError(e) if e.is_connect() => {
                "Could not connect to the register API".to_string()
            }
            Self::HttpError(e) if e.is_timeout() => "The register API timed out".to_string(),
            other => other.to_string(),
        }
    }
}
