//! Configuration types for the GRC register tools.
//!
//! Responsibilities:
//! - Define connection settings (base URL, timeout, retries).
//! - Define list-view settings (page size, page-size options, link window, debounce).
//! - Provide defaults from [`crate::constants`].
//!
//! Does NOT handle:
//! - Loading from files or the environment (see `loader`).
//! - Network connections (see the client crate).
//!
//! Invariants:
//! - A built `Config` has a validated http(s) base URL without a trailing slash.
//! - `page_size_options` is ascending, deduplicated and contains `page_size`.

use std::time::Duration;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE,
    DEFAULT_SEARCH_DEBOUNCE_MS, DEFAULT_TIMEOUT_SECS, PAGE_SIZE_OPTIONS,
};

/// Connection settings for the register API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Base URL of the register API (e.g. http://localhost:3000)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries for throttled or unavailable responses
    pub max_retries: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// List-view settings shared by every register screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub max_visible_pages: usize,
    pub search_debounce: Duration,
}

impl ListConfig {
    /// Standard page-size options plus `page_size` if it is not one of them.
    pub fn options_for(page_size: usize) -> Vec<usize> {
        let mut options = PAGE_SIZE_OPTIONS.to_vec();
        if !options.contains(&page_size) {
            options.push(page_size);
            options.sort_unstable();
        }
        options
    }

    /// The option after `current`, or `current` at the top.
    pub fn next_page_size(&self, current: usize) -> usize {
        self.page_size_options
            .iter()
            .copied()
            .find(|&size| size > current)
            .unwrap_or(current)
    }

    /// The option before `current`, or `current` at the bottom.
    pub fn previous_page_size(&self, current: usize) -> usize {
        self.page_size_options
            .iter()
            .rev()
            .copied()
            .find(|&size| size < current)
            .unwrap_or(current)
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: Self::options_for(DEFAULT_PAGE_SIZE),
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub list: ListConfig,
}
