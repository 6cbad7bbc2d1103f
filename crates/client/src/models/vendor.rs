//! Third-party (vendor) risk evaluations.

use grc_listview::impl_record;
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// A risk evaluation of a single vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRiskEvaluation {
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub id: Option<i64>,
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub evaluation_id: String,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub vendor_id: Option<String>,
    pub vendor_name: Option<String>,
    pub evaluation_name: Option<String>,
    pub evaluation_type: Option<String>,
    pub overall_risk_level: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_f64_from_string_or_number"
    )]
    pub overall_score: Option<f64>,
    pub evaluator_name: Option<String>,
    pub evaluation_date: Option<String>,
    pub evaluation_status: Option<String>,
    pub next_review_date: Option<String>,
}

impl_record!(VendorRiskEvaluation {
    id: evaluation_id,
    fields: [
        id,
        evaluation_id,
        vendor_id,
        vendor_name,
        evaluation_name,
        evaluation_type,
        overall_risk_level,
        overall_score,
        evaluator_name,
        evaluation_date,
        evaluation_status,
        next_review_date,
    ]
});

impl Resource for VendorRiskEvaluation {
    const KIND: ResourceKind = ResourceKind::VendorEvaluations;

    fn mutation_key(&self) -> String {
        self.id
            .map(|id| id.to_string())
            .unwrap_or_else(|| self.evaluation_id.clone())
    }
}
