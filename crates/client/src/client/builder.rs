//! Client builder for constructing [`GrcClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeout)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`GrcClient`] methods)
//! - Loading configuration (handled by `grc-config`)
//!
//! # Invariants
//! - A built client's base URL is http(s) and has no trailing slash

use std::time::Duration;

use grc_config::Config;
use grc_config::constants::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use reqwest::Url;

use crate::client::GrcClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for [`GrcClient`].
#[derive(Debug, Clone)]
pub struct GrcClientBuilder {
    base_url: String,
    timeout: Duration,
    max_retries: usize,
    metrics: Option<MetricsCollector>,
}

impl Default for GrcClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            metrics: None,
        }
    }
}

impl GrcClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base URL of the register API, e.g. `http://localhost:3000`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retries for 429/502/503/504 responses (1s, 2s, 4s... backoff).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Apply connection settings from loaded configuration.
    pub fn from_config(self, config: &Config) -> Self {
        self.base_url(config.connection.base_url.clone())
            .timeout(config.connection.timeout)
            .max_retries(config.connection.max_retries)
    }

    pub fn build(self) -> Result<GrcClient> {
        let base_url = normalize_base_url(&self.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ClientError::HttpError)?;

        Ok(GrcClient {
            http,
            base_url,
            max_retries: self.max_retries,
            metrics: self.metrics,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ClientError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "{trimmed}: scheme must be http or https"
        )));
    }
    Ok(trimmed.to_string())
}
