//! REST API endpoint implementations.
//!
//! Free functions taking the HTTP client and base URL explicitly, so tests can
//! drive them against a mock server without building a [`crate::GrcClient`].

mod records;
mod request;

pub use records::{
    ListQuery, RecordPage, create_record, delete_record, list_records, record_url, update_record,
};
pub use request::send_request_with_retry;
