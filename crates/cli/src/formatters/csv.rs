//! CSV formatter implementation.
//!
//! Responsibilities:
//! - Format outputs as RFC 4180 CSV via the `csv` crate.
//!
//! Does NOT handle:
//! - Other output formats.
//!
//! Invariants:
//! - List output is the visible page only, headed by wire field names.
//! - An empty page still emits the header row.

use anyhow::Result;

use crate::formatters::{Formatter, LinksOutput, ListOutput, MutationOutput, SummaryOutput};

/// CSV formatter.
pub struct CsvFormatter;

fn write_rows<I, R>(header: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

impl Formatter for CsvFormatter {
    fn format_list(&self, list: &ListOutput) -> Result<String> {
        let header: Vec<&str> = list.table.fields.iter().map(String::as_str).collect();
        write_rows(&header, &list.table.rows)
    }

    fn format_summary(&self, summary: &SummaryOutput) -> Result<String> {
        let mut rows: Vec<[String; 4]> = vec![[
            "total".to_string(),
            summary.resource.clone(),
            summary.total.to_string(),
            String::new(),
        ]];

        for breakdown in &summary.breakdowns {
            rows.extend(breakdown.categories.iter().map(|category| {
                [
                    breakdown.field.clone(),
                    category.category.clone(),
                    category.count.to_string(),
                    category.percentage.clone(),
                ]
            }));
        }

        if let Some(stats) = &summary.findings {
            let figures = [
                ("open", stats.open),
                ("in_progress", stats.in_progress),
                ("resolved", stats.resolved),
                ("critical", stats.critical),
                ("high", stats.high),
                ("overdue", stats.overdue),
            ];
            rows.extend(figures.into_iter().map(|(name, value)| {
                [
                    "findings".to_string(),
                    name.to_string(),
                    value.to_string(),
                    String::new(),
                ]
            }));
            rows.push([
                "findings".to_string(),
                "average_aging_days".to_string(),
                stats
                    .average_aging_days
                    .map(|days| format!("{days:.1}"))
                    .unwrap_or_default(),
                String::new(),
            ]);
            rows.push([
                "findings".to_string(),
                "resolution_rate".to_string(),
                String::new(),
                stats.resolution_rate.clone(),
            ]);
        }

        write_rows(&["section", "category", "count", "percentage"], &rows)
    }

    fn format_links(&self, links: &LinksOutput) -> Result<String> {
        let rows = links.links.iter().enumerate().map(|(position, token)| {
            [(position + 1).to_string(), token.clone()]
        });
        write_rows(&["position", "token"], rows)
    }

    fn format_mutation(&self, outcome: &MutationOutput) -> Result<String> {
        write_rows(
            &["resource", "action", "key", "message", "record_count"],
            [[
                outcome.resource.clone(),
                outcome.action.clone(),
                outcome.key.clone().unwrap_or_default(),
                outcome.message.clone(),
                outcome
                    .record_count
                    .map(|count| count.to_string())
                    .unwrap_or_default(),
            ]],
        )
    }
}
