//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format all outputs as pretty-printed JSON.
//!
//! Does NOT handle:
//! - Other output formats.

use crate::formatters::{Formatter, LinksOutput, ListOutput, MutationOutput, SummaryOutput};
use anyhow::Result;

/// JSON formatter.
pub struct JsonFormatter;

fn pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

impl Formatter for JsonFormatter {
    fn format_list(&self, list: &ListOutput) -> Result<String> {
        pretty(list)
    }

    fn format_summary(&self, summary: &SummaryOutput) -> Result<String> {
        pretty(summary)
    }

    fn format_links(&self, links: &LinksOutput) -> Result<String> {
        pretty(links)
    }

    fn format_mutation(&self, outcome: &MutationOutput) -> Result<String> {
        pretty(outcome)
    }
}
