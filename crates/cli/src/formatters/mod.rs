//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide the output formats: Table, JSON, CSV and YAML.
//! - Define the serializable output structures commands hand to formatters.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings; see `common::output_result`).
//! - Terminal UI rendering (see `crates/tui`).
//!
//! Invariants:
//! - Tables are tab-separated for consistent alignment in standard terminals.
//! - Machine-readable formats stay parseable when the result set is empty.
//!
//! ## Empty-State Handling
//!
//! | Format | Empty list | Rationale |
//! |--------|------------|-----------|
//! | JSON | `"records": []` | Machine parseable |
//! | YAML | `records: []` | Machine parseable |
//! | CSV | Header row only | Pipelines can still parse headers |
//! | Table | `No <noun> found` | Interactive format needs human feedback |
//!
//! ## Missing/Null Value Handling
//!
//! Table and CSV cells print `N/A` for missing fields; JSON and YAML keep `null`.

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::Result;
use serde::Serialize;

mod common;
mod csv;
mod json;
mod table;
mod yaml;

pub use common::{DEFAULT_MISSING_VALUE, output_result};

use self::csv::CsvFormatter;
use json::JsonFormatter;
use table::TableFormatter;
use yaml::YamlFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => anyhow::bail!(
                "Invalid output format: {}. Valid options: table, json, csv, yaml",
                s
            ),
        }
    }
}

/// Display-ready cells of the visible page.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    /// Column headers for the table format.
    pub headers: Vec<String>,
    /// Wire field names, used as the CSV header.
    pub fields: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One page of a register after search, filters and pagination.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    pub resource: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Records passing search and filters.
    pub total_items: usize,
    pub range: String,
    pub links: Vec<String>,
    pub records: Vec<serde_json::Value>,
    /// Rows dropped because they did not match the register's model.
    #[serde(skip_serializing_if = "is_zero")]
    pub skipped: usize,
    #[serde(skip)]
    pub title: String,
    #[serde(skip)]
    pub page_bar: String,
    #[serde(skip)]
    pub table: TableView,
}

/// Count of one category and its share of the total.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOutput {
    pub category: String,
    pub count: usize,
    /// Rounded percentage, or `N/A` when the register is empty.
    pub percentage: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakdownOutput {
    pub field: String,
    pub categories: Vec<CategoryOutput>,
}

/// Headline figures of the findings dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct FindingStatsOutput {
    pub as_of: chrono::NaiveDate,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub critical: usize,
    pub high: usize,
    pub overdue: usize,
    pub average_aging_days: Option<f64>,
    pub resolution_rate: String,
}

/// Category counts for one register.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutput {
    pub resource: String,
    pub total: usize,
    pub breakdowns: Vec<BreakdownOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<FindingStatsOutput>,
    #[serde(skip)]
    pub title: String,
}

/// A page-link sequence.
#[derive(Debug, Clone, Serialize)]
pub struct LinksOutput {
    pub current: usize,
    pub total: usize,
    pub max_visible: usize,
    pub links: Vec<String>,
    pub bar: String,
}

/// Result of a create, update or delete followed by a refetch.
#[derive(Debug, Clone, Serialize)]
pub struct MutationOutput {
    pub resource: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Records in the register after the refetch; `None` if the refetch failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// Formatter trait for different output types.
pub trait Formatter {
    fn format_list(&self, list: &ListOutput) -> Result<String>;

    fn format_summary(&self, summary: &SummaryOutput) -> Result<String>;

    fn format_links(&self, links: &LinksOutput) -> Result<String>;

    fn format_mutation(&self, outcome: &MutationOutput) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
    }
}

#[cfg(test)]
mod tests;
