//! Response envelopes returned by the register API.
//!
//! Responsibilities:
//! - Locate the record array in any of the accepted list shapes.
//! - Surface optional server pagination.
//! - Turn `success: false` / `error` envelopes into [`ClientError::Unsuccessful`].
//!
//! Does NOT handle:
//! - Deserializing individual rows into entities (see `endpoints::records`).
//! - Non-2xx statuses (see `endpoints::request`).
//!
//! Invariants:
//! - Accepted list shapes, checked in order: a bare array; `data`, `items` or the
//!   collection key holding an array; `data` holding an object with the collection
//!   key, `items`, or any other array-valued key.
//! - Pagination is read from the top level first, then from inside `data`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};

/// Server-side pagination block (`{ page, limit, total, totalPages }`).
///
/// The audit endpoints name the page count `pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPagination {
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(rename = "totalPages", alias = "pages", default)]
    pub total_pages: usize,
}

/// Rows found in a list response, before entity deserialization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRows {
    pub rows: Vec<Value>,
    pub pagination: Option<ServerPagination>,
}

/// Body of a create/update/delete response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl MutationResponse {
    /// Succeeds unless the body says `success: false` or carries an `error`.
    pub fn into_result(self) -> Result<Self> {
        if self.success == Some(false) || self.error.is_some() {
            let message = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "Request was rejected".to_string());
            return Err(ClientError::Unsuccessful(message));
        }
        Ok(self)
    }

    /// Confirmation text for the user.
    pub fn summary(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// Locate the record array in a list response body.
pub fn extract_rows(body: Value, collection_key: &str) -> Result<RawRows> {
    let mut object = match body {
        Value::Array(rows) => {
            return Ok(RawRows {
                rows,
                pagination: None,
            });
        }
        Value::Object(object) => object,
        other => {
            return Err(ClientError::InvalidResponse(format!(
                "expected a JSON array or object, found {}",
                json_kind(&other)
            )));
        }
    };

    check_success(&object)?;

    let mut pagination = take_pagination(&mut object);

    for key in ["data", "items", collection_key] {
        if let Some(Value::Array(_)) = object.get(key)
            && let Some(Value::Array(rows)) = object.remove(key)
        {
            return Ok(RawRows { rows, pagination });
        }
    }

    if let Some(Value::Object(mut data)) = object.remove("data") {
        if pagination.is_none() {
            pagination = take_pagination(&mut data);
        }
        if let Some(rows) = take_nested_rows(&mut data, collection_key) {
            return Ok(RawRows { rows, pagination });
        }
    }

    Err(ClientError::InvalidResponse(format!(
        "no record array found (looked for data, items, {collection_key})"
    )))
}

fn check_success(object: &Map<String, Value>) -> Result<()> {
    let failed = matches!(object.get("success"), Some(Value::Bool(false)));
    let error = object.get("error").and_then(Value::as_str);

    match (failed, error) {
        (_, Some(message)) => Err(ClientError::Unsuccessful(message.to_string())),
        (true, None) => Err(ClientError::Unsuccessful(
            object
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Request was not successful")
                .to_string(),
        )),
        (false, None) => Ok(()),
    }
}

fn take_pagination(object: &mut Map<String, Value>) -> Option<ServerPagination> {
    object
        .remove("pagination")
        .and_then(|value| serde_json::from_value(value).ok())
}

fn take_nested_rows(data: &mut Map<String, Value>, collection_key: &str) -> Option<Vec<Value>> {
    let key = [collection_key, "items"]
        .into_iter()
        .find(|key| matches!(data.get(*key), Some(Value::Array(_))))
        .map(str::to_string)
        .or_else(|| {
            data.iter()
                .find(|(_, value)| value.is_array())
                .map(|(key, _)| key.clone())
        })?;

    match data.remove(&key) {
        Some(Value::Array(rows)) => Some(rows),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(rows: &RawRows) -> Vec<i64> {
        rows.rows
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .collect()
    }

    #[test]
    fn test_bare_array() {
        let rows = extract_rows(json!([{"id": 1}, {"id": 2}]), "assets").unwrap();
        assert_eq!(ids(&rows), vec![1, 2]);
        assert_eq!(rows.pagination, None);
    }

    #[test]
    fn test_data_items_and_collection_key() {
        let data = extract_rows(json!({"success": true, "data": [{"id": 1}]}), "assets").unwrap();
        assert_eq!(ids(&data), vec![1]);

        let items = extract_rows(json!({"success": true, "items": [{"id": 2}]}), "assets").unwrap();
        assert_eq!(ids(&items), vec![2]);

        let keyed = extract_rows(
            json!({"success": true, "assets": [{"id": 3}], "count": 1}),
            "assets",
        )
        .unwrap();
        assert_eq!(ids(&keyed), vec![3]);
    }

    #[test]
    fn test_nested_data_with_pagination() {
        let body = json!({
            "success": true,
            "data": {
                "engagements": [{"id": 4}, {"id": 5}],
                "pagination": {"page": 2, "limit": 2, "total": 7, "totalPages": 4}
            }
        });
        let rows = extract_rows(body, "engagements").unwrap();
        assert_eq!(ids(&rows), vec![4, 5]);
        assert_eq!(
            rows.pagination,
            Some(ServerPagination {
                page: 2,
                limit: 2,
                total: 7,
                total_pages: 4
            })
        );
    }

    #[test]
    fn test_nested_data_under_unexpected_key() {
        let body = json!({"success": true, "data": {"evaluations": [{"id": 9}], "total": 1}});
        let rows = extract_rows(body, "vendor_evaluations").unwrap();
        assert_eq!(ids(&rows), vec![9]);
    }

    #[test]
    fn test_top_level_pagination() {
        let body = json!({
            "success": true,
            "data": [{"id": 1}],
            "pagination": {"page": 1, "limit": 10, "total": 12, "pages": 2}
        });
        let rows = extract_rows(body, "reports").unwrap();
        assert_eq!(ids(&rows), vec![1]);
        assert_eq!(rows.pagination.map(|p| p.total_pages), Some(2));
    }

    #[test]
    fn test_unsuccessful_envelopes() {
        let err = extract_rows(json!({"success": false, "error": "boom"}), "assets").unwrap_err();
        assert!(matches!(err, ClientError::Unsuccessful(ref m) if m == "boom"));

        let err = extract_rows(json!({"error": "Failed to fetch findings"}), "findings").unwrap_err();
        assert!(matches!(err, ClientError::Unsuccessful(_)));

        let err = extract_rows(json!({"success": false}), "assets").unwrap_err();
        assert!(matches!(err, ClientError::Unsuccessful(ref m) if m == "Request was not successful"));
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert!(matches!(
            extract_rows(json!({"success": true, "count": 0}), "assets"),
            Err(ClientError::InvalidResponse(_))
        ));
        assert!(matches!(
            extract_rows(json!("nope"), "assets"),
            Err(ClientError::InvalidResponse(ref m)) if m.contains("a string")
        ));
    }

    #[test]
    fn test_mutation_response() {
        let ok: MutationResponse =
            serde_json::from_value(json!({"success": true, "message": "Asset deleted"})).unwrap();
        assert_eq!(ok.clone().into_result().unwrap().summary("done"), "Asset deleted");

        let bare: MutationResponse = serde_json::from_value(json!({"data": {"id": 1}})).unwrap();
        assert!(bare.into_result().is_ok());

        let rejected: MutationResponse =
            serde_json::from_value(json!({"success": false, "error": "asset_id is required"}))
                .unwrap();
        assert!(matches!(
            rejected.into_result(),
            Err(ClientError::Unsuccessful(ref m)) if m == "asset_id is required"
        ));
    }
}
