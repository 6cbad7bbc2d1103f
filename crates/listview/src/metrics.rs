//! Metrics reducer for summary cards.
//!
//! Responsibilities:
//! - Count records by category in a single pass ([`compute_metrics`], [`count_by_field`]).
//! - Guard percentages and ratios against empty totals ([`Percentage`], [`ratio`]).
//! - Order category counts for display ([`ordered_counts`], [`Severity`]).
//! - Assemble per-field breakdowns for a record set ([`summarize`]).
//!
//! Does NOT handle:
//! - Rendering cards or charts.
//! - Process metrics (request counters live in `grc-client`).
//!
//! Invariants:
//! - Counts from a partitioning classifier sum to the number of records.
//! - A zero total never divides: percentages become `N/A`, ratios become 0.0.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::record::Record;

/// Count records by the category `classifier` assigns to each one.
///
/// The returned map has no ordering; callers impose one for display.
pub fn compute_metrics<'a, T, K, I, F>(records: I, mut classifier: F) -> HashMap<K, usize>
where
    T: 'a + ?Sized,
    K: Eq + Hash,
    I: IntoIterator<Item = &'a T>,
    F: FnMut(&T) -> K,
{
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(classifier(record)).or_insert(0) += 1;
    }
    counts
}

/// Like [`compute_metrics`], but records classified as `None` do not contribute.
pub fn compute_partial_metrics<'a, T, K, I, F>(records: I, mut classifier: F) -> HashMap<K, usize>
where
    T: 'a + ?Sized,
    K: Eq + Hash,
    I: IntoIterator<Item = &'a T>,
    F: FnMut(&T) -> Option<K>,
{
    let mut counts = HashMap::new();
    for record in records {
        if let Some(category) = classifier(record) {
            *counts.entry(category).or_insert(0) += 1;
        }
    }
    counts
}

/// Count records by the display value of `field`. Records missing the field are skipped.
pub fn count_by_field<'a, T, I>(records: I, field: &str) -> HashMap<String, usize>
where
    T: Record + 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    compute_partial_metrics(records, |record: &T| {
        record.field(field).and_then(|value| value.category())
    })
}

/// `count / total`, or 0.0 when `total` is zero.
pub fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// A percentage that is undefined over an empty total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percentage {
    Value(f64),
    NotApplicable,
}

impl Percentage {
    pub fn of(count: usize, total: usize) -> Self {
        if total == 0 {
            Percentage::NotApplicable
        } else {
            Percentage::Value(count as f64 * 100.0 / total as f64)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Percentage::Value(v) => Some(*v),
            Percentage::NotApplicable => None,
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Percentage::Value(v) => write!(f, "{}%", v.round() as i64),
            Percentage::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Finding severity in display order, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Informational,
}

impl Severity {
    pub const ORDER: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Informational,
    ];

    /// Parse a severity label, ignoring case. `Info` is accepted for `Informational`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            "informational" | "info" => Some(Severity::Informational),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Informational => "Informational",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Order `counts` by `order`, listing every ordered category (zero if absent),
/// then the remaining categories sorted by name.
pub fn ordered_counts(counts: &HashMap<String, usize>, order: &[&str]) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = order
        .iter()
        .map(|category| {
            (
                (*category).to_string(),
                counts.get(*category).copied().unwrap_or(0),
            )
        })
        .collect();

    let mut rest: Vec<(String, usize)> = counts
        .iter()
        .filter(|(category, _)| !order.contains(&category.as_str()))
        .map(|(category, count)| (category.clone(), *count))
        .collect();
    rest.sort();
    out.extend(rest);
    out
}

/// Drop zero-valued categories, as chart panels do.
pub fn non_zero(counts: Vec<(String, usize)>) -> Vec<(String, usize)> {
    counts.into_iter().filter(|(_, count)| *count > 0).collect()
}

/// Counts for one field, ordered for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub field: String,
    pub counts: Vec<(String, usize)>,
}

impl Breakdown {
    pub fn count(&self, category: &str) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| c == category)
            .map_or(0, |(_, n)| *n)
    }
}

/// Record total plus per-field breakdowns.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub total: usize,
    pub breakdowns: Vec<Breakdown>,
}

impl MetricsSummary {
    pub fn percentage(&self, count: usize) -> Percentage {
        Percentage::of(count, self.total)
    }

    pub fn breakdown(&self, field: &str) -> Option<&Breakdown> {
        self.breakdowns.iter().find(|b| b.field == field)
    }
}

/// Build a [`MetricsSummary`] over `records` for each of `fields`.
///
/// A field whose categories are all severities is ordered Critical to
/// Informational; any other field is ordered by descending count, then name.
pub fn summarize<T: Record>(records: &[T], fields: &[&str]) -> MetricsSummary {
    let breakdowns = fields
        .iter()
        .map(|field| {
            let counts = count_by_field(records, field);
            let severity_like =
                !counts.is_empty() && counts.keys().all(|k| Severity::from_label(k).is_some());

            let counts = if severity_like {
                let mut ordered: Vec<(String, usize)> = counts.into_iter().collect();
                ordered.sort_by_key(|(k, _)| Severity::from_label(k));
                ordered
            } else {
                let mut ordered: Vec<(String, usize)> = counts.into_iter().collect();
                ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                ordered
            };

            Breakdown {
                field: (*field).to_string(),
                counts,
            }
        })
        .collect();

    MetricsSummary {
        total: records.len(),
        breakdowns,
    }
}
