//! Internal audit engagements and reports.

use grc_listview::impl_record;
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// A planned or running audit engagement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEngagement {
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub id: Option<i64>,
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub engagement_id: String,
    pub engagement_name: Option<String>,
    pub engagement_type: Option<String>,
    pub engagement_status: Option<String>,
    pub priority: Option<String>,
    pub complexity: Option<String>,
    pub audit_scope: Option<String>,
    pub audit_objectives: Option<String>,
    pub team_lead: Option<String>,
    pub team_lead_email: Option<String>,
    pub planned_start_date: Option<String>,
    pub planned_end_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_f64_from_string_or_number"
    )]
    pub planned_hours: Option<f64>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_f64_from_string_or_number"
    )]
    pub planned_budget: Option<f64>,
    pub created_at: Option<String>,
}

impl_record!(AuditEngagement {
    id: engagement_id,
    fields: [
        id,
        engagement_id,
        engagement_name,
        engagement_type,
        engagement_status,
        priority,
        complexity,
        audit_scope,
        audit_objectives,
        team_lead,
        team_lead_email,
        planned_start_date,
        planned_end_date,
        planned_hours,
        planned_budget,
        created_at,
    ]
});

impl Resource for AuditEngagement {
    const KIND: ResourceKind = ResourceKind::Engagements;
}

/// An issued or draft audit report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub id: Option<i64>,
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub report_id: String,
    pub engagement_id: Option<String>,
    pub engagement_name: Option<String>,
    pub report_title: Option<String>,
    pub report_type: Option<String>,
    pub report_status: Option<String>,
    pub report_period_start: Option<String>,
    pub report_period_end: Option<String>,
    pub report_date: Option<String>,
    pub overall_conclusion: Option<String>,
    pub key_findings: Option<String>,
    pub recommendations: Option<String>,
    pub management_response: Option<String>,
}

impl_record!(AuditReport {
    id: report_id,
    fields: [
        id,
        report_id,
        engagement_id,
        engagement_name,
        report_title,
        report_type,
        report_status,
        report_period_start,
        report_period_end,
        report_date,
        overall_conclusion,
        key_findings,
        recommendations,
        management_response,
    ]
});

impl Resource for AuditReport {
    const KIND: ResourceKind = ResourceKind::Reports;
}
