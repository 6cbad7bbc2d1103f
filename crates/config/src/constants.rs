//! Centralized constants for the GRC register workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default API base URL (the register web application in development).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed HTTP request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of retries for throttled or unavailable responses.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound for configured retries.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// List View Defaults
// =============================================================================

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

/// Default width of the page-link window.
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// Default search debounce window in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Upper bound for the search debounce window in milliseconds.
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 10_000;

// =============================================================================
// TUI Defaults
// =============================================================================

/// Default channel capacity for action messages.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Default UI tick interval in milliseconds. Drives debounce polling and toast expiry.
pub const DEFAULT_UI_TICK_MS: u64 = 50;

/// Default toast time-to-live in seconds.
pub const DEFAULT_TOAST_TTL_SECS: u64 = 5;

// =============================================================================
// Config File
// =============================================================================

/// Application directory name under the platform config directory.
pub const CONFIG_APP_NAME: &str = "grc-register";

/// Config file name inside the application directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
