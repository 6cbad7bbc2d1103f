//! Record abstraction shared by every list view.
//!
//! Responsibilities:
//! - Define the [`Record`] trait that filtering, pagination and metrics are generic over.
//! - Define [`FieldValue`], a borrowed view of a single field.
//! - Provide the [`impl_record!`](crate::impl_record) macro so entity structs declare
//!   their field table once.
//! - Provide [`JsonRow`], the [`Record`] for loosely typed JSON rows.
//!
//! Does NOT handle:
//! - Deserializing records from the API (see `grc-client`).
//! - Deciding which fields are searchable or filterable (see [`crate::filter`]).
//!
//! Invariants:
//! - Field access is null-safe: a missing or null field is `None`, never a panic.
//! - Search comparisons are case-insensitive, filter comparisons are exact.

use std::fmt;

use serde_json::{Map, Value};

/// Borrowed view of one field of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<&'a str>),
}

impl FieldValue<'_> {
    /// Case-insensitive substring test against an already-lowercased needle.
    ///
    /// Lists match when any element matches. Numbers and booleans match on
    /// their display text.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(s) => s.to_lowercase().contains(needle),
            FieldValue::List(items) => items.iter().any(|s| s.to_lowercase().contains(needle)),
            other => other.to_string().to_lowercase().contains(needle),
        }
    }

    /// Exact, case-sensitive comparison against an accepted filter value.
    ///
    /// Lists pass when they contain the accepted value.
    pub fn equals(&self, accepted: &str) -> bool {
        match self {
            FieldValue::Text(s) => *s == accepted,
            FieldValue::List(items) => items.contains(&accepted),
            other => other.to_string() == accepted,
        }
    }

    /// Category label for the metrics reducer. Lists have no single category.
    pub fn category(&self) -> Option<String> {
        match self {
            FieldValue::List(_) => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Float(n) => write!(f, "{n}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// One row of domain data flowing through the list-view core.
pub trait Record {
    /// Stable unique identifier (`id` or a domain key such as `asset_id`).
    fn record_id(&self) -> String;

    /// Read a field by its wire name. Missing or null fields are `None`.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Conversion from a struct field into a [`FieldValue`].
///
/// Used by [`impl_record!`](crate::impl_record); implemented for the scalar,
/// string, list and `Option` types entity models carry.
pub trait AsFieldValue {
    fn as_field_value(&self) -> Option<FieldValue<'_>>;
}

impl AsFieldValue for String {
    fn as_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::Text(self.as_str()))
    }
}

impl AsFieldValue for bool {
    fn as_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::Bool(*self))
    }
}

impl AsFieldValue for f64 {
    fn as_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::Float(*self))
    }
}

macro_rules! integer_field_value {
    ($($ty:ty),*) => {
        $(
            impl AsFieldValue for $ty {
                fn as_field_value(&self) -> Option<FieldValue<'_>> {
                    i64::try_from(*self).ok().map(FieldValue::Integer)
                }
            }
        )*
    };
}

integer_field_value!(i32, i64, u8, u32, u64, usize);

impl AsFieldValue for Vec<String> {
    fn as_field_value(&self) -> Option<FieldValue<'_>> {
        Some(FieldValue::List(self.iter().map(String::as_str).collect()))
    }
}

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    fn as_field_value(&self) -> Option<FieldValue<'_>> {
        self.as_ref().and_then(AsFieldValue::as_field_value)
    }
}

/// Implement [`Record`] for a struct by listing its id field and readable fields.
///
/// Field names double as wire names, so they must match the JSON keys the
/// struct deserializes from.
///
/// ```
/// use grc_listview::{Record, impl_record};
///
/// struct Gap { id: i64, status: Option<String> }
/// impl_record!(Gap { id: id, fields: [id, status] });
///
/// let gap = Gap { id: 7, status: Some("Open".to_string()) };
/// assert_eq!(gap.record_id(), "7");
/// assert!(gap.field("status").is_some());
/// assert!(gap.field("owner").is_none());
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { id: $id:ident, fields: [$($field:ident),* $(,)?] }) => {
        impl $crate::Record for $ty {
            fn record_id(&self) -> String {
                $crate::AsFieldValue::as_field_value(&self.$id)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            }

            fn field(&self, name: &str) -> Option<$crate::FieldValue<'_>> {
                match name {
                    $(stringify!($field) => $crate::AsFieldValue::as_field_value(&self.$field),)*
                    _ => None,
                }
            }
        }
    };
}

/// A loosely typed JSON row whose identifier lives in a caller-named field.
///
/// Rows often carry several `*_id` keys (foreign keys to other registers), so
/// the id field is never guessed.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRow {
    id_field: &'static str,
    row: Map<String, Value>,
}

impl JsonRow {
    pub fn new(id_field: &'static str, row: Map<String, Value>) -> Self {
        Self { id_field, row }
    }

    pub fn id_field(&self) -> &'static str {
        self.id_field
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.row
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.row
    }
}

impl Record for JsonRow {
    fn record_id(&self) -> String {
        match self.row.get(self.id_field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self.row.get(name)? {
            Value::String(s) => Some(FieldValue::Text(s)),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Integer)
                .or_else(|| n.as_f64().map(FieldValue::Float)),
            Value::Array(items) => Some(FieldValue::List(
                items.iter().filter_map(Value::as_str).collect(),
            )),
            Value::Null | Value::Object(_) => None,
        }
    }
}
