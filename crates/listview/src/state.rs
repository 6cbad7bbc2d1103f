//! Per-view list state.
//!
//! Responsibilities:
//! - Own the fetched record set, search term, filter selections and page state.
//! - Keep the filtered view cached and recompute it on every input change.
//! - Expose the visible page, page links and metrics derived from that state.
//!
//! Does NOT handle:
//! - Fetching (the owner calls [`ListViewState::apply_fetch`] with the result).
//! - Debouncing search input (see [`crate::debounce`]).
//!
//! Invariants:
//! - After every mutation `current_page` lies in `[1, total_pages]`.
//! - A search-term change or page-size change returns to page 1.
//! - A failed fetch leaves an empty record set and a pending notice.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hash;

use crate::filter::{FilterSpec, FilterValue, SearchSpec, filter_indices};
use crate::metrics::{MetricsSummary, compute_metrics, summarize};
use crate::paginate::{
    DEFAULT_MAX_VISIBLE_PAGES, Page, PageLinkToken, PageState, generate_page_links, paginate,
};
use crate::record::Record;

/// Inputs that change a [`ListViewState`].
#[derive(Debug, Clone, PartialEq)]
pub enum ListAction<T> {
    RecordsLoaded(Vec<T>),
    LoadFailed(String),
    SetQuery(String),
    SetFilter { field: String, value: FilterValue },
    ClearFilters,
    SelectPage(usize),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    SetPageSize(usize),
}

/// State of one list view instance.
#[derive(Debug, Clone)]
pub struct ListViewState<T> {
    records: Vec<T>,
    query: String,
    filters: FilterSpec,
    search_spec: SearchSpec,
    page: PageState,
    max_visible_pages: usize,
    filtered: Vec<usize>,
    notice: Option<String>,
}

impl<T: Record> ListViewState<T> {
    /// Empty state on page 1 at `page_size`.
    pub fn new(search_spec: SearchSpec, page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            query: String::new(),
            filters: FilterSpec::new(),
            search_spec,
            page: PageState::new(page_size),
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            filtered: Vec::new(),
            notice: None,
        }
    }

    pub fn with_max_visible_pages(mut self, max_visible_pages: usize) -> Self {
        self.max_visible_pages = max_visible_pages.max(1);
        self
    }

    pub fn with_filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self.refilter();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.set_query(query);
        self
    }

    pub fn apply(&mut self, action: ListAction<T>) {
        match action {
            ListAction::RecordsLoaded(records) => self.replace_records(records),
            ListAction::LoadFailed(message) => self.fail_load(message),
            ListAction::SetQuery(query) => {
                self.set_query(query);
            }
            ListAction::SetFilter { field, value } => self.set_filter(field, value),
            ListAction::ClearFilters => self.clear_filters(),
            ListAction::SelectPage(page) => self.select_page(page),
            ListAction::NextPage => {
                self.next_page();
            }
            ListAction::PreviousPage => {
                self.previous_page();
            }
            ListAction::FirstPage => self.select_page(1),
            ListAction::LastPage => self.select_page(self.total_pages()),
            ListAction::SetPageSize(size) => self.set_page_size(size),
        }
    }

    /// Replace the record set wholesale, as after a successful fetch.
    pub fn replace_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.notice = None;
        self.refilter();
    }

    /// Apply a fetch outcome. Errors empty the record set and leave a notice.
    pub fn apply_fetch<E: fmt::Display>(&mut self, result: Result<Vec<T>, E>) {
        match result {
            Ok(records) => self.replace_records(records),
            Err(e) => self.fail_load(e.to_string()),
        }
    }

    fn fail_load(&mut self, message: String) {
        tracing::warn!(error = %message, "List fetch failed; showing empty record set");
        self.records.clear();
        self.notice = Some(message);
        self.refilter();
    }

    /// Set the search term. Returns true and goes to page 1 when it changed.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.query {
            return false;
        }
        self.query = query;
        self.page.reset();
        self.refilter();
        true
    }

    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        self.filters.set(field, value);
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refilter();
    }

    /// Go to page `page`, clamped to `[1, total_pages]`.
    pub fn select_page(&mut self, page: usize) {
        self.page.go_to(page, self.filtered.len());
    }

    pub fn next_page(&mut self) -> bool {
        self.page.next(self.filtered.len())
    }

    pub fn previous_page(&mut self) -> bool {
        self.page.previous()
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.set_page_size(page_size);
        self.page.clamp(self.filtered.len());
    }

    fn refilter(&mut self) {
        self.filtered = filter_indices(&self.records, &self.query, &self.filters, &self.search_spec);
        self.page.clamp(self.filtered.len());
        tracing::debug!(
            records = self.records.len(),
            filtered = self.filtered.len(),
            page = self.page.current_page(),
            "List view recomputed"
        );
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn search_spec(&self) -> &SearchSpec {
        &self.search_spec
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size()
    }

    pub fn max_visible_pages(&self) -> usize {
        self.max_visible_pages
    }

    pub fn total_pages(&self) -> usize {
        self.page.total_pages(self.filtered.len())
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Take the pending notice so it is surfaced once.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Records passing the current search and filters, in fetch order.
    pub fn filtered(&self) -> Vec<&T> {
        self.filtered
            .iter()
            .filter_map(|&index| self.records.get(index))
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The current page of the filtered view.
    pub fn visible(&self) -> Page<Vec<&T>> {
        paginate(&self.filtered, self.page).map_items(|indices| {
            indices
                .iter()
                .filter_map(|&index| self.records.get(index))
                .collect()
        })
    }

    pub fn page_links(&self) -> Vec<PageLinkToken> {
        generate_page_links(
            self.page.current_page(),
            self.total_pages(),
            self.max_visible_pages,
        )
    }

    /// Category counts over the full record set.
    pub fn metrics<K, F>(&self, classifier: F) -> HashMap<K, usize>
    where
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        compute_metrics(&self.records, classifier)
    }

    /// Per-field breakdowns over the full record set.
    pub fn summary(&self, fields: &[&str]) -> MetricsSummary {
        summarize(&self.records, fields)
    }

    /// Sorted distinct values of `field` across the record set, for filter selectors.
    pub fn distinct_values(&self, field: &str) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|record| record.field(field))
            .flat_map(|value| match value {
                crate::record::FieldValue::List(items) => {
                    items.into_iter().map(str::to_string).collect::<Vec<_>>()
                }
                other => vec![other.to_string()],
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
