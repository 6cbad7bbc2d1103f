//! Filter-and-search engine.
//!
//! Responsibilities:
//! - Hold the search field set ([`SearchSpec`]) and categorical selections ([`FilterSpec`]).
//! - Derive the filtered view of a record set from a query and the active filters.
//!
//! Does NOT handle:
//! - Pagination (see [`crate::paginate`]).
//! - Building server-side query strings (see `grc-client`).
//!
//! Invariants:
//! - Filtering is pure and total; the output preserves input order.
//! - An empty query passes every record through the search stage.
//! - `All` selections never constrain.
//! - A missing field is a non-match for both search and filters.

use std::collections::BTreeMap;
use std::fmt;

use crate::record::Record;

/// Ordered set of fields eligible for free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSpec {
    fields: Vec<String>,
}

impl SearchSpec {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !out.contains(&field) {
                out.push(field);
            }
        }
        Self { fields: out }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One filter selection: the `All` sentinel or an exact accepted value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FilterValue {
    #[default]
    All,
    Exactly(String),
}

impl FilterValue {
    /// Parse a selector value. `"All"`, `"all"` and the empty string mean no constraint.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "All" | "all" => FilterValue::All,
            other => FilterValue::Exactly(other.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::All)
    }

    /// The accepted value, or `None` for `All`.
    pub fn accepted(&self) -> Option<&str> {
        match self {
            FilterValue::All => None,
            FilterValue::Exactly(value) => Some(value),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::All => f.write_str("All"),
            FilterValue::Exactly(value) => f.write_str(value),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(raw: &str) -> Self {
        FilterValue::parse(raw)
    }
}

/// Field name to selection mapping. Fields without an entry are `All`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    selections: BTreeMap<String, FilterValue>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterSpec::set`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a selection. Setting `All` removes the entry.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        let field = field.into();
        match value.into() {
            FilterValue::All => {
                self.selections.remove(&field);
            }
            value => {
                self.selections.insert(field, value);
            }
        }
    }

    pub fn get(&self, field: &str) -> &FilterValue {
        static ALL: FilterValue = FilterValue::All;
        self.selections.get(field).unwrap_or(&ALL)
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// Non-`All` selections in field-name order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .filter_map(|(field, value)| value.accepted().map(|v| (field.as_str(), v)))
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }
}

/// Whether any search field of `record` contains the lowercased needle.
pub fn matches_search<T: Record + ?Sized>(record: &T, needle: &str, spec: &SearchSpec) -> bool {
    if needle.is_empty() {
        return true;
    }
    spec.fields().iter().any(|field| {
        record
            .field(field)
            .is_some_and(|value| value.contains_lowercase(needle))
    })
}

/// Whether `record` satisfies every non-`All` selection.
pub fn matches_filters<T: Record + ?Sized>(record: &T, filters: &FilterSpec) -> bool {
    filters.active().all(|(field, accepted)| {
        record
            .field(field)
            .is_some_and(|value| value.equals(accepted))
    })
}

/// Derive the filtered view: records passing both the search and filter stages.
///
/// The search is a case-insensitive substring match over `search_spec`'s fields;
/// filters are exact matches. Relative order is preserved.
pub fn filter_records<'a, T, I>(
    records: I,
    query: &str,
    filters: &FilterSpec,
    search_spec: &SearchSpec,
) -> Vec<&'a T>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            matches_search(*record, &needle, search_spec) && matches_filters(*record, filters)
        })
        .collect()
}

/// Same as [`filter_records`] but yields indices into `records`.
pub fn filter_indices<T: Record>(
    records: &[T],
    query: &str,
    filters: &FilterSpec,
    search_spec: &SearchSpec,
) -> Vec<usize> {
    let needle = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            matches_search(*record, &needle, search_spec) && matches_filters(*record, filters)
        })
        .map(|(index, _)| index)
        .collect()
}
