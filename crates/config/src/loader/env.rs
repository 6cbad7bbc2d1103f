//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read `GRC_*` variables and apply them to a `ConfigLoader`.
//! - Treat empty or whitespace-only variables as unset.
//!
//! Does NOT handle:
//! - `.env` loading (see `ConfigLoader::load_dotenv`).
//! - Range validation (see `builder.rs`).
//!
//! Invariants:
//! - Returned values are trimmed.
//! - Unparseable numbers return `ConfigError::InvalidValue` naming the variable.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

pub(crate) const ENV_BASE_URL: &str = "GRC_BASE_URL";
pub(crate) const ENV_TIMEOUT: &str = "GRC_TIMEOUT";
pub(crate) const ENV_MAX_RETRIES: &str = "GRC_MAX_RETRIES";
pub(crate) const ENV_PAGE_SIZE: &str = "GRC_PAGE_SIZE";
pub(crate) const ENV_MAX_VISIBLE_PAGES: &str = "GRC_MAX_VISIBLE_PAGES";
pub(crate) const ENV_SEARCH_DEBOUNCE_MS: &str = "GRC_SEARCH_DEBOUNCE_MS";
pub(crate) const ENV_CONFIG_PATH: &str = "GRC_CONFIG_PATH";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: format!("must be {expected} (got {raw:?})"),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub(crate) fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none(ENV_BASE_URL) {
        loader.set_base_url(Some(url));
    }
    if let Some(secs) = parse_env::<u64>(ENV_TIMEOUT, "a number of seconds")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = parse_env::<usize>(ENV_MAX_RETRIES, "a non-negative integer")? {
        loader.set_max_retries(Some(retries));
    }
    if let Some(size) = parse_env::<usize>(ENV_PAGE_SIZE, "a positive integer")? {
        loader.set_page_size(Some(size));
    }
    if let Some(window) = parse_env::<usize>(ENV_MAX_VISIBLE_PAGES, "a positive integer")? {
        loader.set_max_visible_pages(Some(window));
    }
    if let Some(ms) = parse_env::<u64>(ENV_SEARCH_DEBOUNCE_MS, "a number of milliseconds")? {
        loader.set_search_debounce(Some(Duration::from_millis(ms)));
    }
    Ok(())
}

/// Config path from the environment, used only when no explicit path was given.
pub(crate) fn config_path_from_env() -> Option<PathBuf> {
    env_var_or_none(ENV_CONFIG_PATH).map(PathBuf::from)
}
