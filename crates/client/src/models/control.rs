//! Governance control library records.

use grc_listview::impl_record;
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// A control in the governance control library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Database key used by `/api/governance/controls/{id}`.
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number"
    )]
    pub id: Option<i64>,
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub control_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub framework: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub control_type: Option<String>,
    pub implementation_status: Option<String>,
    pub effectiveness_rating: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_from_number_or_string"
    )]
    pub maturity_level: Option<String>,
    pub owner: Option<String>,
    pub department: Option<String>,
    pub assessment_frequency: Option<String>,
    pub last_assessment_date: Option<String>,
    pub next_assessment_date: Option<String>,
    pub automation_level: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_string_list"
    )]
    pub control_measures: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::opt_f64_from_string_or_number"
    )]
    pub cost_estimate: Option<f64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl_record!(Control {
    id: control_id,
    fields: [
        id,
        control_id,
        name,
        description,
        framework,
        category,
        subcategory,
        control_type,
        implementation_status,
        effectiveness_rating,
        maturity_level,
        owner,
        department,
        assessment_frequency,
        last_assessment_date,
        next_assessment_date,
        automation_level,
        control_measures,
        cost_estimate,
        created_at,
        updated_at,
    ]
});

impl Resource for Control {
    const KIND: ResourceKind = ResourceKind::Controls;

    fn mutation_key(&self) -> String {
        self.id
            .map(|id| id.to_string())
            .unwrap_or_else(|| self.control_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grc_listview::{FilterSpec, Record, SearchSpec, filter_records};
    use serde_json::json;

    #[test]
    fn test_control_measures_are_searchable_and_filterable() {
        let controls: Vec<Control> = serde_json::from_value(json!([
            {
                "id": 1,
                "control_id": "AC-2",
                "name": "Account Management",
                "implementation_status": "Implemented",
                "control_measures": ["Quarterly access review", "Joiner/mover/leaver"]
            },
            {
                "id": 2,
                "control_id": "IA-2",
                "name": "Identification",
                "implementation_status": "Planned",
                "control_measures": "MFA, SSO",
                "cost_estimate": "1500.00"
            }
        ]))
        .unwrap();

        let spec = SearchSpec::new(["name", "control_measures"]);
        let hits = filter_records(&controls, "mfa", &FilterSpec::new(), &spec);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record_id(), "IA-2");
        assert_eq!(hits[0].cost_estimate, Some(1500.0));

        let by_measure = FilterSpec::new().with("control_measures", "Quarterly access review");
        let hits = filter_records(&controls, "", &by_measure, &spec);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].mutation_key(), "1");
    }
}
