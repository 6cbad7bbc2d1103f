//! List, create, update and delete endpoints shared by every register.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use grc_listview::FilterSpec;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{MutationResponse, ServerPagination, extract_rows};
use crate::resource::ResourceKind;

/// Query string for a register list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    /// `(param, value)` pairs, already mapped to API parameter names.
    pub filters: Vec<(String, String)>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query mirroring a list view: the search term exactly as the view filters
    /// with it, plus every non-`All` filter mapped to the register's parameter names.
    pub fn for_view(kind: ResourceKind, search: &str, filters: &FilterSpec) -> Self {
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            filters: filters
                .active()
                .map(|(field, value)| (kind.param_for(field), value.to_string()))
                .collect(),
            page: None,
            limit: None,
        }
    }

    /// Ask the server for one page instead of the whole register.
    pub fn with_page(mut self, page: usize, limit: usize) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 3);
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        params.extend(self.filters.iter().cloned());
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// Records from one list response.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage<T> {
    pub records: Vec<T>,
    pub pagination: Option<ServerPagination>,
    /// Rows dropped because they did not deserialize.
    pub skipped: usize,
}

/// Fetch a register's records.
///
/// Rows that fail to deserialize into `T` are skipped and counted rather
/// than failing the whole list.
pub async fn list_records<T: DeserializeOwned>(
    client: &Client,
    base_url: &str,
    kind: ResourceKind,
    query: &ListQuery,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<RecordPage<T>> {
    let url = format!("{}{}", base_url, kind.path());
    let builder = client.get(&url).query(&query.params());
    let response = send_request_with_retry(builder, max_retries, kind.path(), "GET", metrics).await?;

    let body = read_json(response).await?;
    let raw = extract_rows(body, kind.collection_key())?;

    let mut records = Vec::with_capacity(raw.rows.len());
    let mut skipped = 0;
    for row in raw.rows {
        match serde_json::from_value::<T>(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!(register = %kind, error = %e, "Skipping malformed row");
                if let Some(m) = metrics {
                    m.record_deserialization_failure(kind.path(), std::any::type_name::<T>());
                }
            }
        }
    }

    debug!(register = %kind, count = records.len(), skipped, "Fetched records");
    Ok(RecordPage {
        records,
        pagination: raw.pagination,
        skipped,
    })
}

/// Create a record from a JSON body.
pub async fn create_record(
    client: &Client,
    base_url: &str,
    kind: ResourceKind,
    body: &Value,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<MutationResponse> {
    let url = format!("{}{}", base_url, kind.path());
    let builder = client.post(&url).json(body);
    let response =
        send_request_with_retry(builder, max_retries, kind.path(), "POST", metrics).await?;
    read_mutation(response).await
}

/// Replace a record's fields.
pub async fn update_record(
    client: &Client,
    base_url: &str,
    kind: ResourceKind,
    key: &str,
    body: &Value,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<MutationResponse> {
    let url = record_url(base_url, kind, key)?;
    let endpoint = format!("{}/:id", kind.path());
    let builder = client.put(url).json(body);
    let response = send_request_with_retry(builder, max_retries, &endpoint, "PUT", metrics)
        .await
        .map_err(|e| not_found_as(e, kind, key))?;
    read_mutation(response).await
}

/// Delete a record.
pub async fn delete_record(
    client: &Client,
    base_url: &str,
    kind: ResourceKind,
    key: &str,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
) -> Result<MutationResponse> {
    let url = record_url(base_url, kind, key)?;
    let endpoint = format!("{}/:id", kind.path());
    let builder = client.delete(url);
    let response = send_request_with_retry(builder, max_retries, &endpoint, "DELETE", metrics)
        .await
        .map_err(|e| not_found_as(e, kind, key))?;
    read_mutation(response).await
}

/// `<base_url><path>/<key>`, with `key` percent-encoded as one path segment.
pub fn record_url(base_url: &str, kind: ResourceKind, key: &str) -> Result<Url> {
    if key.trim().is_empty() {
        return Err(ClientError::InvalidUrl("record key is empty".to_string()));
    }
    let mut url = Url::parse(&format!("{}{}", base_url, kind.path()))
        .map_err(|e| ClientError::InvalidUrl(format!("Invalid base URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(format!("Cannot append a path to {base_url}")))?
        .push(key);
    Ok(url)
}

fn not_found_as(error: ClientError, kind: ResourceKind, key: &str) -> ClientError {
    match error {
        ClientError::ApiError { status: 404, .. } => {
            ClientError::NotFound(format!("{} {}", kind.name(), key))
        }
        other => other,
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value> {
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| ClientError::InvalidResponse(format!("response is not JSON: {e}")))
}

async fn read_mutation(response: reqwest::Response) -> Result<MutationResponse> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(MutationResponse::default());
    }
    let parsed: MutationResponse = serde_json::from_str(&text)
        .map_err(|e| ClientError::InvalidResponse(format!("unexpected mutation response: {e}")))?;
    parsed.into_result()
}
