//! Configuration loading for the TUI.
//!
//! Responsibilities:
//! - Merge defaults, the config file, `GRC_*` environment variables and CLI flags.
//! - Build the API client from the merged configuration.
//!
//! Does NOT handle:
//! - Loading `.env` (done first thing in `main()`).
//! - Terminal state management (see `runtime::terminal`).
//!
//! Invariants:
//! - Configuration precedence: CLI args > env vars > config file > defaults.
//! - A blank `--config-path` falls back to `GRC_CONFIG_PATH` and then the platform default.

use anyhow::{Context, Result};
use grc_client::{GrcClient, MetricsCollector};
use grc_config::{Config, ConfigLoader};

use crate::cli::Cli;

/// Load configuration with CLI overrides applied on top.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();

    if let Some(path) = &cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }

    loader = loader
        .from_file()
        .context("Failed to read config file")?
        .from_env()
        .context("Failed to read GRC_* environment variables")?;

    if let Some(url) = &cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(page_size) = cli.page_size {
        loader = loader.with_page_size(page_size);
    }

    loader.build().context("Invalid configuration")
}

/// Build the API client, attaching request metrics when an exporter is running.
pub fn create_client(config: &Config, metrics_enabled: bool) -> Result<GrcClient> {
    let mut builder = GrcClient::builder().from_config(config);
    if metrics_enabled {
        builder = builder.metrics(MetricsCollector::new());
    }
    builder.build().context("Failed to build API client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "grc-tui",
            "--config-path",
            "/nonexistent/grc-tui-test/config.json",
            "--base-url",
            "http://grc.example.test:8080",
            "--page-size",
            "25",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.connection.base_url, "http://grc.example.test:8080");
        assert_eq!(config.list.page_size, 25);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let cli = Cli::parse_from([
            "grc-tui",
            "--config-path",
            "/nonexistent/grc-tui-test/config.json",
            "--page-size",
            "0",
        ]);
        assert!(load_config(&cli).is_err());
    }
}
