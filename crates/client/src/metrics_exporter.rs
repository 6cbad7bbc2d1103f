//! Prometheus exporter for the client's API metrics.
//!
//! Installs a global `PrometheusRecorder` and serves `/metrics` over HTTP.
//! Used by the CLI's `--metrics-bind` and the TUI's equivalent flag.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::METRIC_REQUEST_DURATION;

/// Latency buckets in seconds for register API calls.
const REQUEST_DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
];

/// Running Prometheus exporter.
///
/// The recorder stays installed for the life of the process.
#[derive(Debug)]
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the Prometheus exporter as the global metrics recorder.
    ///
    /// # Errors
    /// Returns an error if the bind address does not parse, another recorder
    /// is already installed, or the HTTP listener cannot be built.
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
                REQUEST_DURATION_BUCKETS,
            )?
            .with_http_listener(addr)
            .install_recorder()
            .map_err(|_| MetricsExporterError::RecorderAlreadyInstalled)?;

        info!("Prometheus metrics exporter started on http://{}/metrics", addr);

        Ok(Self { bind_addr: addr })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    #[error("A metrics recorder is already installed")]
    RecorderAlreadyInstalled,

    #[error("Failed to build Prometheus recorder: {0}")]
    BuildError(String),
}

impl From<metrics_exporter_prometheus::BuildError> for MetricsExporterError {
    fn from(err: metrics_exporter_prometheus::BuildError) -> Self {
        MetricsExporterError::BuildError(err.to_string())
    }
}
