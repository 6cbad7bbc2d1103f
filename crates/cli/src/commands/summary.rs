//! Summary command implementation.
//!
//! Responsibilities:
//! - Fetch a whole register and count its records by category.
//! - Add the findings dashboard figures (aging, overdue, resolution rate).
//!
//! Does NOT handle:
//! - Counting rules (see `grc_listview::summarize`).
//!
//! Invariants:
//! - Counts cover the full register, never a single page.
//! - Percentages are `N/A` for an empty register.

use anyhow::Result;
use chrono::NaiveDate;
use grc_client::{Finding, FindingStats, ListQuery, Resource, ResourceKind, with_resource};
use grc_listview::summarize;
use tracing::{info, warn};

use crate::cancellation::cancellable;
use crate::commands::CommandContext;
use crate::formatters::{BreakdownOutput, CategoryOutput, FindingStatsOutput, SummaryOutput};

#[derive(Debug, Clone)]
pub struct SummaryArgs {
    pub kind: ResourceKind,
    /// Fields to break down. Empty means the register's card fields.
    pub by: Vec<String>,
    pub as_of: Option<NaiveDate>,
}

pub async fn run(ctx: &CommandContext, args: SummaryArgs) -> Result<()> {
    let fields: Vec<&str> = if args.by.is_empty() {
        args.kind.summary_fields().to_vec()
    } else {
        args.by.iter().map(String::as_str).collect()
    };

    info!(register = %args.kind, fields = ?fields, "Summarizing register");

    let output = match args.kind {
        ResourceKind::Findings => {
            let findings = fetch_all::<Finding>(ctx).await?;
            let as_of = args
                .as_of
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            let mut output = build_summary(ResourceKind::Findings, &findings, &fields);
            output.findings = Some(finding_stats(&findings, as_of));
            output
        }
        kind => {
            if args.as_of.is_some() {
                warn!(register = %kind, "--as-of only applies to findings; ignoring");
            }
            with_resource!(kind, |T| {
                let records = fetch_all::<T>(ctx).await?;
                build_summary(kind, &records, &fields)
            })
        }
    };

    ctx.emit(|formatter| formatter.format_summary(&output))
}

async fn fetch_all<T: Resource>(ctx: &CommandContext) -> Result<Vec<T>> {
    let client = ctx.client()?;
    let spinner = ctx.spinner(format!("Fetching {}", T::KIND.noun()));
    let fetched = cancellable(&ctx.cancel, client.list::<T>(&ListQuery::new())).await;
    spinner.finish();
    let fetched = fetched?;
    if fetched.skipped > 0 {
        warn!(
            register = %T::KIND,
            skipped = fetched.skipped,
            "Malformed records left out of the summary"
        );
    }
    Ok(fetched.records)
}

fn build_summary<T: Resource>(kind: ResourceKind, records: &[T], fields: &[&str]) -> SummaryOutput {
    let summary = summarize(records, fields);
    let breakdowns = summary
        .breakdowns
        .iter()
        .map(|breakdown| BreakdownOutput {
            field: breakdown.field.clone(),
            categories: breakdown
                .counts
                .iter()
                .map(|(category, count)| CategoryOutput {
                    category: category.clone(),
                    count: *count,
                    percentage: summary.percentage(*count).to_string(),
                })
                .collect(),
        })
        .collect();

    SummaryOutput {
        resource: kind.name().to_string(),
        total: summary.total,
        breakdowns,
        findings: None,
        title: format!("{} summary", kind.title()),
    }
}

fn finding_stats(findings: &[Finding], as_of: NaiveDate) -> FindingStatsOutput {
    let stats = FindingStats::compute(findings, as_of);
    FindingStatsOutput {
        as_of,
        open: stats.open,
        in_progress: stats.in_progress,
        resolved: stats.resolved,
        critical: stats.critical,
        high: stats.high,
        overdue: stats.overdue,
        average_aging_days: stats.average_aging_days,
        resolution_rate: stats.resolution_rate.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grc_client::Asset;
    use grc_client::testing::load_fixture;

    fn fixture_rows<T: Resource>(path: &str, key: &str) -> Vec<T> {
        serde_json::from_value(load_fixture(path)[key].clone()).unwrap()
    }

    fn categories(breakdown: &BreakdownOutput) -> Vec<(&str, usize, &str)> {
        breakdown
            .categories
            .iter()
            .map(|c| (c.category.as_str(), c.count, c.percentage.as_str()))
            .collect()
    }

    #[test]
    fn test_build_summary_counts_and_percentages() {
        let assets: Vec<Asset> = fixture_rows("assets/list_assets.json", "assets");
        let output = build_summary(
            ResourceKind::Assets,
            &assets,
            &["classification", "business_value"],
        );

        assert_eq!(output.total, 3);
        assert_eq!(output.title, "Asset Inventory summary");
        assert_eq!(output.breakdowns.len(), 2);

        assert_eq!(output.breakdowns[0].field, "classification");
        assert_eq!(
            categories(&output.breakdowns[0]),
            vec![("Confidential", 2, "67%"), ("Public", 1, "33%")]
        );
        assert_eq!(output.breakdowns[1].field, "business_value");
        assert_eq!(
            categories(&output.breakdowns[1]),
            vec![("High", 2, "67%"), ("Medium", 1, "33%")]
        );
    }

    #[test]
    fn test_empty_register_has_no_categories() {
        let output = build_summary::<Asset>(ResourceKind::Assets, &[], &["classification"]);
        assert_eq!(output.total, 0);
        assert!(output.breakdowns[0].categories.is_empty());
    }

    #[test]
    fn test_finding_stats_as_of_date() {
        let findings: Vec<Finding> = fixture_rows("findings/list_findings.json", "data");
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let stats = finding_stats(&findings, as_of);

        assert_eq!(stats.open, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.high, 1);
        // 101 was due 2024-03-15 and is still open
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.resolution_rate, "33%");
    }
}
