//! CLI command implementations.
//!
//! Responsibilities:
//! - Hold the per-invocation settings every command needs ([`CommandContext`]).
//!
//! Does NOT handle:
//! - Argument parsing (see `args`) or routing (see `dispatch`).

pub mod links;
pub mod list;
pub mod mutate;
pub mod summary;

use std::path::PathBuf;

use anyhow::Result;
use grc_client::{GrcClient, MetricsCollector};
use grc_config::Config;
use tokio_util::sync::CancellationToken;

use crate::formatters::{Formatter, OutputFormat, get_formatter, output_result};
use crate::progress::Spinner;

/// Settings shared by every command of one invocation.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
    /// Attach a metrics collector to the client (set with `--metrics-bind`).
    pub metrics: bool,
    pub cancel: CancellationToken,
}

impl CommandContext {
    pub fn client(&self) -> Result<GrcClient> {
        let mut builder = GrcClient::builder().from_config(&self.config);
        if self.metrics {
            builder = builder.metrics(MetricsCollector::new());
        }
        Ok(builder.build()?)
    }

    pub fn spinner(&self, label: impl Into<String>) -> Spinner {
        Spinner::new(!self.quiet, label)
    }

    /// Format with the selected formatter and write to stdout or `--output-file`.
    pub fn emit<F>(&self, render: F) -> Result<()>
    where
        F: FnOnce(&dyn Formatter) -> Result<String>,
    {
        let formatter = get_formatter(self.format);
        let output = render(formatter.as_ref())?;
        output_result(&output, self.format, self.output_file.as_ref())
    }
}
