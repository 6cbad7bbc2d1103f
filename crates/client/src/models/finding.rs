//! Assessment findings and their aging figures.

use chrono::NaiveDate;
use grc_listview::{Percentage, impl_record};
use serde::{Deserialize, Serialize};

use super::parse_date;
use crate::resource::{Resource, ResourceKind};

/// A finding raised during an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub id: String,
    pub finding_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub assessment_id: Option<String>,
    pub assessment_name: Option<String>,
    pub finding_title: Option<String>,
    pub finding_description: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub recommendation: Option<String>,
    pub assigned_to: Option<String>,
    pub department_name: Option<String>,
    pub organization_name: Option<String>,
    pub due_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl_record!(Finding {
    id: id,
    fields: [
        id,
        finding_id,
        assessment_id,
        assessment_name,
        finding_title,
        finding_description,
        severity,
        status,
        category,
        recommendation,
        assigned_to,
        department_name,
        organization_name,
        due_date,
        created_at,
        updated_at,
    ]
});

impl Resource for Finding {
    const KIND: ResourceKind = ResourceKind::Findings;
}

impl Finding {
    /// Resolved or Closed, case-insensitively.
    pub fn is_resolved(&self) -> bool {
        self.status.as_deref().is_some_and(|status| {
            status.eq_ignore_ascii_case("resolved") || status.eq_ignore_ascii_case("closed")
        })
    }

    /// Days since the finding was raised, or `None` without a readable `created_at`.
    pub fn aging_days(&self, today: NaiveDate) -> Option<i64> {
        let created = parse_date(self.created_at.as_deref()?)?;
        Some((today - created).num_days().max(0))
    }

    /// Days past `due_date`; 0 when not yet due, resolved, or without a due date.
    pub fn overdue_days(&self, today: NaiveDate) -> i64 {
        if self.is_resolved() {
            return 0;
        }
        self.due_date
            .as_deref()
            .and_then(parse_date)
            .map_or(0, |due| (today - due).num_days().max(0))
    }

    fn status_is(&self, label: &str) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(label))
    }

    fn severity_is(&self, label: &str) -> bool {
        self.severity
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(label))
    }
}

/// Headline figures for the findings dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct FindingStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub critical: usize,
    pub high: usize,
    pub overdue: usize,
    /// Mean age in days over findings with a readable `created_at`.
    pub average_aging_days: Option<f64>,
    pub resolution_rate: Percentage,
}

impl FindingStats {
    pub fn compute<'a, I>(findings: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Finding>,
    {
        let mut stats = FindingStats {
            total: 0,
            open: 0,
            in_progress: 0,
            resolved: 0,
            critical: 0,
            high: 0,
            overdue: 0,
            average_aging_days: None,
            resolution_rate: Percentage::NotApplicable,
        };
        let mut aging_sum = 0i64;
        let mut aged = 0usize;

        for finding in findings {
            stats.total += 1;
            if finding.status_is("open") {
                stats.open += 1;
            }
            if finding.status_is("in progress") {
                stats.in_progress += 1;
            }
            if finding.is_resolved() {
                stats.resolved += 1;
            }
            if finding.severity_is("critical") {
                stats.critical += 1;
            }
            if finding.severity_is("high") {
                stats.high += 1;
            }
            if finding.overdue_days(today) > 0 {
                stats.overdue += 1;
            }
            if let Some(days) = finding.aging_days(today) {
                aging_sum += days;
                aged += 1;
            }
        }

        if aged > 0 {
            stats.average_aging_days = Some(aging_sum as f64 / aged as f64);
        }
        stats.resolution_rate = Percentage::of(stats.resolved, stats.total);
        stats
    }
}
