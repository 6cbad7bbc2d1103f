//! Serde helpers for the register API's loose JSON typing.
//!
//! Responsibilities:
//! - Accept either JSON numbers or strings for numeric fields (Postgres
//!   `numeric` columns arrive as strings, integer columns as numbers).
//! - Accept either numbers or strings for identifier-like fields that are
//!   displayed as text.
//! - Accept either an array or a comma-separated string for list fields.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (ranges, required business rules).
//!
//! Invariants / assumptions:
//! - `null` and absent fields deserialize to `None` (use with `#[serde(default)]`).
//! - Blank strings are treated as absent for numeric fields.

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListOrString {
    List(Vec<Option<String>>),
    String(String),
}

pub fn opt_i64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(None),
        Some(StringOrNumber::String(s)) => s.trim().parse::<i64>().map(Some).map_err(D::Error::custom),
        Some(StringOrNumber::I64(v)) => Ok(Some(v)),
        Some(StringOrNumber::U64(v)) => i64::try_from(v).map(Some).map_err(D::Error::custom),
        Some(StringOrNumber::F64(v)) => Ok(Some(v as i64)),
    }
}

pub fn opt_f64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(None),
        Some(StringOrNumber::String(s)) => s.trim().parse::<f64>().map(Some).map_err(D::Error::custom),
        Some(StringOrNumber::I64(v)) => Ok(Some(v as f64)),
        Some(StringOrNumber::U64(v)) => Ok(Some(v as f64)),
        Some(StringOrNumber::F64(v)) => Ok(Some(v)),
    }
}

pub fn opt_string_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::String(s) => s,
        StringOrNumber::I64(v) => v.to_string(),
        StringOrNumber::U64(v) => v.to_string(),
        StringOrNumber::F64(v) => v.to_string(),
    }))
}

pub fn string_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    opt_string_from_number_or_string(deserializer)?
        .ok_or_else(|| D::Error::custom("expected a string or number, found null"))
}

pub fn opt_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<ListOrString>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        ListOrString::List(items) => items.into_iter().flatten().collect(),
        ListOrString::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    }))
}
