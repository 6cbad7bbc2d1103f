//! Command-line argument parsing for grc-tui.
//!
//! Responsibilities:
//! - Define CLI argument structure using clap derive macros.
//! - Provide parsed CLI arguments to the main application.
//!
//! Does NOT handle:
//! - Configuration loading or validation (see `main.rs` and `grc_config`).
//! - Terminal state management (see `runtime::terminal`).
//!
//! Invariants:
//! - CLI arguments are parsed once at startup via `Cli::parse()`.

use clap::Parser;
use grc_client::ResourceKind;
use std::path::PathBuf;

/// Command-line arguments for grc-tui.
///
/// Configuration precedence (highest to lowest):
/// 1. CLI arguments (e.g., --base-url, --page-size)
/// 2. Environment variables (e.g., GRC_BASE_URL, GRC_PAGE_SIZE)
/// 3. Config file (config.json)
/// 4. Default values
#[derive(Debug, Parser)]
#[command(
    name = "grc-tui",
    about = "Terminal user interface for GRC registers",
    version,
    after_help = "Examples:\n  grc-tui\n  grc-tui --resource findings\n  grc-tui --resource gaps --page-size 25\n  grc-tui --log-dir /var/log/grc-tui --no-mouse\n"
)]
pub struct Cli {
    /// Register to browse (assets, findings, controls, engagements, reports, gaps, vendor-evaluations)
    #[arg(long, short = 'r', default_value = "assets")]
    pub resource: ResourceKind,

    /// Base URL of the register API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to a custom configuration file
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// Initial page size
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Disable mouse support
    #[arg(long)]
    pub no_mouse: bool,

    /// Enable Prometheus metrics endpoint and bind address (e.g., "localhost:9090")
    #[arg(long, env = "GRC_METRICS_BIND")]
    pub metrics_bind: Option<String>,
}
