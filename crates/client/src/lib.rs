//! GRC register REST API client.
//!
//! Typed access to the register endpoints (assets, findings, controls, audit
//! engagements and reports, compliance gaps, vendor risk evaluations) with
//! tolerant envelope parsing, retry on throttling, and request metrics.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod resource;
mod serde_helpers;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use client::GrcClient;
pub use client::builder::GrcClientBuilder;
pub use endpoints::{ListQuery, RecordPage};
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    Asset, AuditEngagement, AuditReport, ComplianceGap, Control, Finding, FindingStats,
    MutationResponse, ServerPagination, VendorRiskEvaluation,
};
pub use resource::{Column, FilterField, Resource, ResourceKind, UnknownResource};
