//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see `main` and `cancellation`).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use grc_client::ClientError;

/// Structured exit codes for grc-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully.
    Success = 0,

    /// Unhandled or generic failure, including configuration errors.
    GeneralError = 1,

    /// The API answered 401.
    AuthenticationFailed = 2,

    /// Network, timeout, DNS failure or an unusable base URL.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// The record addressed by an update or delete does not exist.
    NotFound = 4,

    /// The API rejected the request body or returned an unreadable response.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// The API answered 403.
    PermissionDenied = 6,

    /// HTTP 429 after the retry budget was spent.
    RateLimited = 7,

    /// HTTP 502/503/504 after the retry budget was spent.
    ServiceUnavailable = 8,

    /// SIGINT/Ctrl+C (128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Returns true if this exit code indicates a retryable condition.
    #[cfg(test)]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ExitCode::ConnectionError | ExitCode::RateLimited | ExitCode::ServiceUnavailable
        )
    }

    fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ExitCode::ValidationError,
            401 => ExitCode::AuthenticationFailed,
            403 => ExitCode::PermissionDenied,
            404 => ExitCode::NotFound,
            429 => ExitCode::RateLimited,
            502..=504 => ExitCode::ServiceUnavailable,
            _ => ExitCode::GeneralError,
        }
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,

            ClientError::NotFound(_) => ExitCode::NotFound,

            ClientError::Unsuccessful(_) => ExitCode::ValidationError,
            ClientError::InvalidResponse(_) => ExitCode::ValidationError,

            ClientError::ApiError { status, .. } => Self::from_status(*status),
            ClientError::MaxRetriesExceeded { last_status, .. } => Self::from_status(*last_status),
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no ClientError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ClientError>())
            .map_or(ExitCode::GeneralError, ExitCode::from)
    }
}
