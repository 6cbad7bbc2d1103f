//! Register API client.
//!
//! [`GrcClient`] wraps the free endpoint functions with the connection
//! settings they need (HTTP client, base URL, retry budget, metrics).
//!
//! # What this module does NOT handle:
//! - Request construction and retries (delegated to [`crate::endpoints`])
//! - Client configuration (handled by [`builder::GrcClientBuilder`])
//!
//! # Invariants
//! - Mutations never patch local state; callers refetch after a successful mutation.

pub mod builder;

use grc_listview::JsonRow;
use serde_json::{Map, Value};

use crate::endpoints::{self, ListQuery, RecordPage};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::MutationResponse;
use crate::resource::{Resource, ResourceKind};

/// GRC register REST API client.
///
/// ```rust,ignore
/// use grc_client::{Asset, GrcClient, ListQuery};
///
/// let client = GrcClient::builder()
///     .base_url("http://localhost:3000")
///     .build()?;
/// let page = client.list::<Asset>(&ListQuery::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GrcClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) max_retries: usize,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl GrcClient {
    pub fn builder() -> builder::GrcClientBuilder {
        builder::GrcClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Fetch typed records from `T`'s register.
    pub async fn list<T: Resource>(&self, query: &ListQuery) -> Result<RecordPage<T>> {
        endpoints::list_records(
            &self.http,
            &self.base_url,
            T::KIND,
            query,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Fetch loosely typed rows from any register, keyed by the register's id field.
    pub async fn list_rows(
        &self,
        kind: ResourceKind,
        query: &ListQuery,
    ) -> Result<RecordPage<JsonRow>> {
        let page: RecordPage<Map<String, Value>> = endpoints::list_records(
            &self.http,
            &self.base_url,
            kind,
            query,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await?;

        Ok(RecordPage {
            records: page
                .records
                .into_iter()
                .map(|row| JsonRow::new(kind.id_field(), row))
                .collect(),
            pagination: page.pagination,
            skipped: page.skipped,
        })
    }

    pub async fn create(&self, kind: ResourceKind, body: &Value) -> Result<MutationResponse> {
        endpoints::create_record(
            &self.http,
            &self.base_url,
            kind,
            body,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn update(
        &self,
        kind: ResourceKind,
        key: &str,
        body: &Value,
    ) -> Result<MutationResponse> {
        endpoints::update_record(
            &self.http,
            &self.base_url,
            kind,
            key,
            body,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }

    pub async fn delete(&self, kind: ResourceKind, key: &str) -> Result<MutationResponse> {
        endpoints::delete_record(
            &self.http,
            &self.base_url,
            kind,
            key,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }
}
