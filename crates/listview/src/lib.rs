//! List-view core for GRC register screens.
//!
//! Every register screen (assets, findings, controls, engagements, reports, gaps,
//! vendor risk evaluations) shows the same list machinery: a fetched record set,
//! a free-text search, categorical filters, a paginated table with a windowed
//! page-link bar, and summary cards counting records by category. This crate
//! implements that machinery once, generic over the [`Record`] trait.
//!
//! - [`filter`]: the filter-and-search engine
//! - [`paginate`]: page slicing and page-link generation
//! - [`metrics`]: category counts and guarded percentages
//! - [`state`]: [`ListViewState`], the per-view state tying the three together
//! - [`debounce`]: single-slot debounce for search-triggered refetches
//!
//! The filter, paginate and metrics functions are pure and total: missing fields
//! are non-matches, out-of-range pages are empty, and empty totals produce sentinels.

pub mod debounce;
pub mod filter;
pub mod metrics;
pub mod paginate;
pub mod record;
pub mod state;

pub use debounce::{DebounceToken, Debouncer};
pub use filter::{FilterSpec, FilterValue, SearchSpec, filter_indices, filter_records};
pub use metrics::{
    Breakdown, MetricsSummary, Percentage, Severity, compute_metrics, compute_partial_metrics,
    count_by_field, non_zero, ordered_counts, ratio, summarize,
};
pub use paginate::{
    DEFAULT_MAX_VISIBLE_PAGES, Page, PageLinkToken, PageState, generate_page_links, page_bar,
    paginate, total_pages,
};
pub use record::{AsFieldValue, FieldValue, JsonRow, Record};
pub use state::{ListAction, ListViewState};
