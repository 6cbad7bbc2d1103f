//! Error types for configuration loading.
//!
//! Invariants:
//! - Every variant names the offending variable or path.
//! - Dotenv errors never include raw `.env` line contents.

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Base URL is required. Set GRC_BASE_URL, pass --base-url, or set base_url in the config file.")]
    MissingBaseUrl,

    #[error("Unable to determine config directory")]
    ConfigDirUnavailable,

    #[error("Failed to read config file at {path}")]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}")]
    ConfigFileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid timeout: {message}")]
    InvalidTimeout { message: String },

    #[error("invalid max retries: {message}")]
    InvalidMaxRetries { message: String },

    #[error("invalid list settings: {message}")]
    InvalidListSettings { message: String },

    /// Only the byte index is reported, never the offending line.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
