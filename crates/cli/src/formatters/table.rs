//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format list pages, summaries, page links and mutation results as
//!   tab-separated text for humans.
//!
//! Does NOT handle:
//! - Other output formats.
//! - File I/O.

use std::fmt::Write;

use anyhow::Result;

use crate::formatters::{Formatter, LinksOutput, ListOutput, MutationOutput, SummaryOutput};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_list(&self, list: &ListOutput) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "{}", list.title)?;

        if !list.table.rows.is_empty() {
            writeln!(output)?;
            writeln!(output, "{}", list.table.headers.join("\t"))?;
            for row in &list.table.rows {
                writeln!(output, "{}", row.join("\t"))?;
            }
        }

        writeln!(output)?;
        writeln!(output, "{}", list.range)?;
        if list.total_pages > 1 {
            writeln!(
                output,
                "Page {} of {}: {}",
                list.page, list.total_pages, list.page_bar
            )?;
        }
        if list.skipped > 0 {
            writeln!(
                output,
                "{} malformed record(s) skipped",
                list.skipped
            )?;
        }

        Ok(output)
    }

    fn format_summary(&self, summary: &SummaryOutput) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "{}", summary.title)?;
        writeln!(output, "Total: {}", summary.total)?;

        for breakdown in &summary.breakdowns {
            writeln!(output)?;
            writeln!(output, "{}", breakdown.field)?;
            if breakdown.categories.is_empty() {
                writeln!(output, "  (no values)")?;
            }
            for category in &breakdown.categories {
                writeln!(
                    output,
                    "  {}\t{}\t{}",
                    category.category, category.count, category.percentage
                )?;
            }
        }

        if let Some(stats) = &summary.findings {
            writeln!(output)?;
            writeln!(output, "Findings as of {}", stats.as_of)?;
            writeln!(output, "  Open\t{}", stats.open)?;
            writeln!(output, "  In progress\t{}", stats.in_progress)?;
            writeln!(output, "  Resolved\t{}", stats.resolved)?;
            writeln!(output, "  Critical\t{}", stats.critical)?;
            writeln!(output, "  High\t{}", stats.high)?;
            writeln!(output, "  Overdue\t{}", stats.overdue)?;
            match stats.average_aging_days {
                Some(days) => writeln!(output, "  Average age\t{days:.1} days")?,
                None => writeln!(output, "  Average age\tN/A")?,
            }
            writeln!(output, "  Resolution rate\t{}", stats.resolution_rate)?;
        }

        Ok(output)
    }

    fn format_links(&self, links: &LinksOutput) -> Result<String> {
        Ok(format!("{}\n", links.bar))
    }

    fn format_mutation(&self, outcome: &MutationOutput) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "{}", outcome.message)?;
        if let Some(count) = outcome.record_count {
            writeln!(output, "{} now holds {} record(s)", outcome.resource, count)?;
        }
        Ok(output)
    }
}
