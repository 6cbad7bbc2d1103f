//! YAML formatter implementation.
//!
//! Responsibilities:
//! - Format all outputs as YAML.
//!
//! Does NOT handle:
//! - Other output formats.

use crate::formatters::{Formatter, LinksOutput, ListOutput, MutationOutput, SummaryOutput};
use anyhow::Result;

/// YAML formatter.
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format_list(&self, list: &ListOutput) -> Result<String> {
        Ok(serde_yaml::to_string(list)?)
    }

    fn format_summary(&self, summary: &SummaryOutput) -> Result<String> {
        Ok(serde_yaml::to_string(summary)?)
    }

    fn format_links(&self, links: &LinksOutput) -> Result<String> {
        Ok(serde_yaml::to_string(links)?)
    }

    fn format_mutation(&self, outcome: &MutationOutput) -> Result<String> {
        Ok(serde_yaml::to_string(outcome)?)
    }
}
