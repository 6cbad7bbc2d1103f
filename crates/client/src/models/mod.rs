//! Data models for register API responses.
//!
//! One struct per register entity, each implementing [`grc_listview::Record`]
//! through `impl_record!` so the list-view core can search, filter and count
//! it. Unknown JSON fields are ignored; absent or null fields are `None`.

mod asset;
mod audit;
mod control;
pub mod envelope;
mod finding;
mod gap;
mod vendor;

pub use asset::Asset;
pub use audit::{AuditEngagement, AuditReport};
pub use control::Control;
pub use envelope::{MutationResponse, RawRows, ServerPagination, extract_rows};
pub use finding::{Finding, FindingStats};
pub use gap::ComplianceGap;
pub use vendor::VendorRiskEvaluation;

use chrono::{DateTime, NaiveDate};

/// Calendar date of an API timestamp or date string.
///
/// Accepts RFC 3339 timestamps (`2024-03-01T08:30:00.000Z`) and anything
/// starting with a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
