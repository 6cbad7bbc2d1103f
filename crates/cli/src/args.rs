//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse register names and `field=value` filter pairs.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not merge configuration (see `main`).

use clap::{Parser, Subcommand};
use grc_client::ResourceKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grc-cli")]
#[command(about = "GRC register CLI - browse and edit governance, risk and compliance registers", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  grc-cli list findings --filter status=Open --page-size 5\n  grc-cli list controls --search access --page 2\n  grc-cli summary findings --as-of 2024-05-01\n  grc-cli links --current 7 --total 20\n  grc-cli create assets --data @asset.json\n  grc-cli delete assets 3 --force\n"
)]
pub struct Cli {
    /// Base URL of the register API (e.g., http://localhost:3000)
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum number of retries for throttled or unavailable responses
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,

    /// Output format (table, json, csv, yaml)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Path to a custom configuration file (overrides default location).
    ///
    /// Can also be set via GRC_CONFIG_PATH environment variable.
    #[arg(long, global = true, value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9090)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    /// Suppress progress spinners on stderr
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of a register after search and filters
    List {
        /// Register to list (assets, findings, controls, engagements, reports, gaps, vendor-evaluations)
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,

        /// Case-insensitive text matched against the register's search fields
        #[arg(short, long)]
        search: Option<String>,

        /// Exact-match filter as FIELD=VALUE (repeatable; VALUE "All" disables it)
        #[arg(short, long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Page to show (1-based, clamped to the last page)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Records per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Let the API paginate (sends page and limit) instead of paging locally
        #[arg(long)]
        server_side: bool,
    },

    /// Count a register's records by category
    Summary {
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,

        /// Field to break down (repeatable; defaults to the register's card fields)
        #[arg(long = "by", value_name = "FIELD")]
        by: Vec<String>,

        /// Reference date for finding aging and overdue figures (YYYY-MM-DD, default today)
        #[arg(long, value_name = "DATE", value_parser = parse_date)]
        as_of: Option<chrono::NaiveDate>,
    },

    /// Print the page-link sequence for a page position
    Links {
        /// Current page
        #[arg(short, long)]
        current: usize,

        /// Total number of pages
        #[arg(short, long)]
        total: usize,

        /// Width of the page window (defaults to the configured value)
        #[arg(short, long)]
        max_visible: Option<usize>,
    },

    /// Create a record
    Create {
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,

        /// JSON object, or @PATH to read it from a file
        #[arg(short, long, value_name = "JSON|@FILE")]
        data: String,
    },

    /// Update a record
    Update {
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,

        /// Record key used in the request path
        id: String,

        /// JSON object, or @PATH to read it from a file
        #[arg(short, long, value_name = "JSON|@FILE")]
        data: String,
    },

    /// Delete a record
    Delete {
        #[arg(value_parser = parse_resource)]
        resource: ResourceKind,

        /// Record key used in the request path
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_resource(raw: &str) -> Result<ResourceKind, String> {
    raw.parse().map_err(|e: grc_client::UnknownResource| e.to_string())
}

/// Split `FIELD=VALUE` at the first `=`.
pub(crate) fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{raw}'")),
    }
}

fn parse_date(raw: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
