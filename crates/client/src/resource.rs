//! Register metadata: endpoints, search fields, filters, columns and summaries.
//!
//! Responsibilities:
//! - Enumerate the registers the API exposes ([`ResourceKind`]).
//! - Describe each register's list view declaratively so the CLI and TUI can
//!   drive any register through the same code path.
//! - Tie each entity struct to its register via the [`Resource`] trait.
//!
//! Does NOT handle:
//! - HTTP calls (see [`crate::endpoints`]).
//! - Filtering or pagination (see `grc-listview`).
//!
//! Invariants:
//! - Every field named here is a wire name readable through the entity's `Record` impl.
//! - `FilterField::param` is the query parameter the API expects for that field.

use std::fmt;
use std::str::FromStr;

use grc_listview::{Record, SearchSpec};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A categorical filter offered by a register screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    /// Record field the filter compares against.
    pub field: &'static str,
    /// Query parameter sent to the API.
    pub param: &'static str,
    pub label: &'static str,
    /// Fixed choices. Empty means the choices come from the loaded records.
    pub options: &'static [&'static str],
}

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub header: &'static str,
    /// Relative width used by the TUI layout.
    pub width: u16,
}

const fn filter(field: &'static str, param: &'static str, label: &'static str) -> FilterField {
    FilterField {
        field,
        param,
        label,
        options: &[],
    }
}

const fn column(field: &'static str, header: &'static str, width: u16) -> Column {
    Column {
        field,
        header,
        width,
    }
}

/// The registers exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Assets,
    Findings,
    Controls,
    Engagements,
    Reports,
    Gaps,
    VendorEvaluations,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Assets,
        ResourceKind::Findings,
        ResourceKind::Controls,
        ResourceKind::Engagements,
        ResourceKind::Reports,
        ResourceKind::Gaps,
        ResourceKind::VendorEvaluations,
    ];

    /// Command-line name.
    pub const fn name(&self) -> &'static str {
        match self {
            ResourceKind::Assets => "assets",
            ResourceKind::Findings => "findings",
            ResourceKind::Controls => "controls",
            ResourceKind::Engagements => "engagements",
            ResourceKind::Reports => "reports",
            ResourceKind::Gaps => "gaps",
            ResourceKind::VendorEvaluations => "vendor-evaluations",
        }
    }

    /// Screen title.
    pub const fn title(&self) -> &'static str {
        match self {
            ResourceKind::Assets => "Asset Inventory",
            ResourceKind::Findings => "Assessment Findings",
            ResourceKind::Controls => "Governance Controls",
            ResourceKind::Engagements => "Audit Engagements",
            ResourceKind::Reports => "Audit Reports",
            ResourceKind::Gaps => "Compliance Gap Analysis",
            ResourceKind::VendorEvaluations => "Third-Party Risk Evaluations",
        }
    }

    /// Plural noun for range labels ("Showing 1 to 10 of 42 assets").
    pub const fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Assets => "assets",
            ResourceKind::Findings => "findings",
            ResourceKind::Controls => "controls",
            ResourceKind::Engagements => "engagements",
            ResourceKind::Reports => "reports",
            ResourceKind::Gaps => "gaps",
            ResourceKind::VendorEvaluations => "evaluations",
        }
    }

    pub const fn path(&self) -> &'static str {
        match self {
            ResourceKind::Assets => "/api/assets",
            ResourceKind::Findings => "/api/findings",
            ResourceKind::Controls => "/api/governance/controls",
            ResourceKind::Engagements => "/api/audit/planning/engagements",
            ResourceKind::Reports => "/api/audit/reports",
            ResourceKind::Gaps => "/api/gaps-analysis",
            ResourceKind::VendorEvaluations => "/api/third-party-risk-evaluations",
        }
    }

    /// Key under which some endpoints nest their record array.
    pub const fn collection_key(&self) -> &'static str {
        match self {
            ResourceKind::Assets => "assets",
            ResourceKind::Findings => "findings",
            ResourceKind::Controls => "controls",
            ResourceKind::Engagements => "engagements",
            ResourceKind::Reports => "reports",
            ResourceKind::Gaps => "gaps",
            ResourceKind::VendorEvaluations => "evaluations",
        }
    }

    pub const fn id_field(&self) -> &'static str {
        match self {
            ResourceKind::Assets => "asset_id",
            ResourceKind::Findings | ResourceKind::Gaps => "id",
            ResourceKind::Controls => "control_id",
            ResourceKind::Engagements => "engagement_id",
            ResourceKind::Reports => "report_id",
            ResourceKind::VendorEvaluations => "evaluation_id",
        }
    }

    pub fn search_fields(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Assets => &[
                "asset_id",
                "asset_name",
                "asset_type",
                "owner",
                "classification",
                "business_value",
            ],
            ResourceKind::Findings => &["finding_title", "finding_description", "assessment_name"],
            ResourceKind::Controls => &["name", "description", "control_id", "control_measures"],
            ResourceKind::Engagements => {
                &["engagement_name", "engagement_id", "team_lead", "audit_scope"]
            }
            ResourceKind::Reports => &["report_title", "report_id", "engagement_name"],
            ResourceKind::Gaps => &[
                "requirement_id",
                "requirement_title",
                "gap_description",
                "action_owner",
            ],
            ResourceKind::VendorEvaluations => {
                &["evaluation_name", "vendor_name", "evaluator_name"]
            }
        }
    }

    pub fn filter_fields(&self) -> &'static [FilterField] {
        const ASSETS: &[FilterField] = &[
            filter("asset_type", "asset_type", "Type"),
            filter("classification", "classification", "Classification"),
            filter("business_value", "business_value", "Business value"),
        ];
        const FINDINGS: &[FilterField] = &[
            filter("status", "status", "Status"),
            filter("severity", "severity", "Severity"),
            filter("assessment_id", "assessment_id", "Assessment"),
        ];
        const CONTROLS: &[FilterField] = &[
            filter("framework", "framework", "Framework"),
            filter("category", "category", "Category"),
            filter("implementation_status", "status", "Status"),
            filter("effectiveness_rating", "effectiveness", "Effectiveness"),
            filter("control_type", "control_type", "Type"),
        ];
        const ENGAGEMENTS: &[FilterField] = &[
            filter("engagement_status", "status", "Status"),
            filter("engagement_type", "engagement_type", "Type"),
            filter("priority", "priority", "Priority"),
        ];
        const REPORTS: &[FilterField] = &[
            filter("report_status", "status", "Status"),
            filter("report_type", "reportType", "Type"),
        ];
        const GAPS: &[FilterField] = &[
            FilterField {
                field: "framework",
                param: "framework",
                label: "Framework",
                options: &["NESA UAE", "MICA", "MAS"],
            },
            filter("domain", "domain", "Domain"),
            filter("priority", "priority", "Priority"),
            filter("status", "status", "Status"),
        ];
        const VENDOR_EVALUATIONS: &[FilterField] = &[
            filter("overall_risk_level", "riskLevel", "Risk level"),
            filter("evaluation_status", "status", "Status"),
        ];

        match self {
            ResourceKind::Assets => ASSETS,
            ResourceKind::Findings => FINDINGS,
            ResourceKind::Controls => CONTROLS,
            ResourceKind::Engagements => ENGAGEMENTS,
            ResourceKind::Reports => REPORTS,
            ResourceKind::Gaps => GAPS,
            ResourceKind::VendorEvaluations => VENDOR_EVALUATIONS,
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        const ASSETS: &[Column] = &[
            column("asset_id", "Asset ID", 12),
            column("asset_name", "Name", 28),
            column("asset_type", "Type", 14),
            column("classification", "Classification", 14),
            column("owner", "Owner", 18),
            column("business_value", "Value", 10),
        ];
        const FINDINGS: &[Column] = &[
            column("id", "ID", 6),
            column("finding_title", "Title", 36),
            column("severity", "Severity", 10),
            column("status", "Status", 12),
            column("assessment_name", "Assessment", 24),
            column("due_date", "Due", 12),
        ];
        const CONTROLS: &[Column] = &[
            column("control_id", "Control", 10),
            column("name", "Name", 30),
            column("framework", "Framework", 14),
            column("category", "Category", 16),
            column("implementation_status", "Status", 14),
            column("effectiveness_rating", "Effectiveness", 14),
        ];
        const ENGAGEMENTS: &[Column] = &[
            column("engagement_id", "Engagement", 14),
            column("engagement_name", "Name", 30),
            column("engagement_type", "Type", 14),
            column("engagement_status", "Status", 12),
            column("priority", "Priority", 10),
            column("team_lead", "Lead", 18),
        ];
        const REPORTS: &[Column] = &[
            column("report_id", "Report", 12),
            column("report_title", "Title", 34),
            column("report_type", "Type", 14),
            column("report_status", "Status", 12),
            column("engagement_name", "Engagement", 24),
            column("report_date", "Date", 12),
        ];
        const GAPS: &[Column] = &[
            column("id", "ID", 6),
            column("framework", "Framework", 10),
            column("requirement_id", "Requirement", 12),
            column("gap_description", "Gap", 40),
            column("priority", "Priority", 10),
            column("status", "Status", 12),
            column("action_owner", "Owner", 16),
        ];
        const VENDOR_EVALUATIONS: &[Column] = &[
            column("evaluation_id", "Evaluation", 18),
            column("vendor_name", "Vendor", 22),
            column("evaluation_name", "Name", 28),
            column("overall_risk_level", "Risk", 10),
            column("evaluation_status", "Status", 12),
            column("evaluation_date", "Date", 12),
        ];

        match self {
            ResourceKind::Assets => ASSETS,
            ResourceKind::Findings => FINDINGS,
            ResourceKind::Controls => CONTROLS,
            ResourceKind::Engagements => ENGAGEMENTS,
            ResourceKind::Reports => REPORTS,
            ResourceKind::Gaps => GAPS,
            ResourceKind::VendorEvaluations => VENDOR_EVALUATIONS,
        }
    }

    /// Fields broken down on the dashboard cards.
    pub fn summary_fields(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Assets => &["classification", "asset_type", "business_value"],
            ResourceKind::Findings => &["severity", "status"],
            ResourceKind::Controls => &["implementation_status", "effectiveness_rating", "framework"],
            ResourceKind::Engagements => &["engagement_status", "priority"],
            ResourceKind::Reports => &["report_status", "report_type"],
            ResourceKind::Gaps => &["priority", "status", "framework"],
            ResourceKind::VendorEvaluations => &["overall_risk_level", "evaluation_status"],
        }
    }

    pub fn search_spec(&self) -> SearchSpec {
        SearchSpec::new(self.search_fields().iter().copied())
    }

    pub fn filter_field(&self, field: &str) -> Option<&'static FilterField> {
        self.filter_fields().iter().find(|f| f.field == field)
    }

    /// Query parameter for a record field, defaulting to the field name.
    pub fn param_for(&self, field: &str) -> String {
        self.filter_field(field)
            .map_or_else(|| field.to_string(), |f| f.param.to_string())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a register name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown register '{0}' (expected one of: assets, findings, controls, engagements, reports, gaps, vendor-evaluations)")]
pub struct UnknownResource(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let kind = match normalized.as_str() {
            "assets" | "asset" => ResourceKind::Assets,
            "findings" | "finding" => ResourceKind::Findings,
            "controls" | "control" => ResourceKind::Controls,
            "engagements" | "engagement" => ResourceKind::Engagements,
            "reports" | "report" => ResourceKind::Reports,
            "gaps" | "gap" | "gaps-analysis" => ResourceKind::Gaps,
            "vendor-evaluations" | "vendors" | "third-party-risk-evaluations" => {
                ResourceKind::VendorEvaluations
            }
            _ => return Err(UnknownResource(s.to_string())),
        };
        Ok(kind)
    }
}

/// An entity struct served by one register.
pub trait Resource: Record + DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    const KIND: ResourceKind;

    /// Key used in `PUT/DELETE <path>/<key>`. Defaults to the record id.
    fn mutation_key(&self) -> String {
        self.record_id()
    }
}

/// Run `$body` with `$ty` bound to the entity type of a runtime [`ResourceKind`].
///
/// ```rust,ignore
/// with_resource!(kind, |T| list::run_typed::<T>(ctx, args).await)
/// ```
#[macro_export]
macro_rules! with_resource {
    ($kind:expr, |$ty:ident| $body:expr) => {
        match $kind {
            $crate::ResourceKind::Assets => {
                type $ty = $crate::Asset;
                $body
            }
            $crate::ResourceKind::Findings => {
                type $ty = $crate::Finding;
                $body
            }
            $crate::ResourceKind::Controls => {
                type $ty = $crate::Control;
                $body
            }
            $crate::ResourceKind::Engagements => {
                type $ty = $crate::AuditEngagement;
                $body
            }
            $crate::ResourceKind::Reports => {
                type $ty = $crate::AuditReport;
                $body
            }
            $crate::ResourceKind::Gaps => {
                type $ty = $crate::ComplianceGap;
                $body
            }
            $crate::ResourceKind::VendorEvaluations => {
                type $ty = $crate::VendorRiskEvaluation;
                $body
            }
        }
    };
}
