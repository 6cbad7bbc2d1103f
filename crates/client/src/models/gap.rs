//! Compliance gap analysis records (NESA UAE, MICA, MAS and similar frameworks).

use grc_listview::impl_record;
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// A gap between a framework requirement and the current control environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceGap {
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub assessment_id: Option<String>,
    pub assessment_name: Option<String>,
    pub framework: Option<String>,
    pub domain: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub requirement_id: Option<String>,
    pub requirement_title: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub control_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub current_maturity_level: Option<i64>,
    pub existing_controls: Option<String>,
    pub gap_description: Option<String>,
    pub severity: Option<String>,
    pub priority: Option<String>,
    pub estimated_effort: Option<String>,
    pub recommended_actions: Option<String>,
    pub action_plan: Option<String>,
    pub action_owner: Option<String>,
    pub status: Option<String>,
    pub target_completion_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl_record!(ComplianceGap {
    id: id,
    fields: [
        id,
        assessment_id,
        assessment_name,
        framework,
        domain,
        requirement_id,
        requirement_title,
        control_id,
        current_maturity_level,
        existing_controls,
        gap_description,
        severity,
        priority,
        estimated_effort,
        recommended_actions,
        action_plan,
        action_owner,
        status,
        target_completion_date,
        created_at,
        updated_at,
    ]
});

impl Resource for ComplianceGap {
    const KIND: ResourceKind = ResourceKind::Gaps;
}
