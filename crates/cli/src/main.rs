//! GRC register CLI - list, summarize and edit register records from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Merge configuration (defaults, config file, `GRC_*` environment, flags).
//! - Run the list-view pipeline over a fetched register and print the result.
//!
//! Does NOT handle:
//! - HTTP or envelope parsing (see `crates/client`).
//! - Filtering, pagination or metrics logic (see `crates/listview`).
//!
//! Invariants:
//! - `load_dotenv()` runs BEFORE CLI parsing.
//! - Logs go to stderr; stdout is reserved for command output.

mod args;
mod cancellation;
mod commands;
mod dispatch;
mod error;
mod formatters;
mod interactive;
mod progress;

use args::Cli;
use cancellation::{is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use grc_config::ConfigLoader;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let _metrics_exporter = if let Some(ref bind_addr) = cli.metrics_bind {
        match grc_client::MetricsExporter::install(bind_addr) {
            Ok(exporter) => Some(exporter),
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        None
    };

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to build configuration: {:#}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Flags override `GRC_*` variables, which override the config file.
fn build_config(cli: &Cli) -> Result<grc_config::Config, grc_config::ConfigError> {
    let mut loader = ConfigLoader::new();

    // Blank paths fall back to GRC_CONFIG_PATH and then the platform default
    if let Some(ref path) = cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }

    loader = loader.from_file()?.from_env()?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }

    loader.build()
}
