//! Configuration loader builder.
//!
//! Responsibilities:
//! - Collect optional overrides from the config file, environment and builder calls.
//! - Validate and normalize the merged values into a `Config`.
//!
//! Does NOT handle:
//! - Environment parsing details (see `env.rs`).
//! - Config file parsing (see `file.rs`).
//!
//! Invariants / Assumptions:
//! - Later layers overwrite earlier ones; callers apply file, then env, then flags.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::PathBuf;
use std::time::Duration;

use super::env::{apply_env, config_path_from_env};
use super::error::ConfigError;
use super::file::{ConfigFile, default_config_path};
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE,
    DEFAULT_SEARCH_DEBOUNCE_MS, DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES, MAX_SEARCH_DEBOUNCE_MS,
    MAX_TIMEOUT_SECS,
};
use crate::types::{Config, ConnectionConfig, ListConfig};

/// Configuration loader that merges file, environment and explicit settings.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    page_size: Option<usize>,
    max_visible_pages: Option<usize>,
    search_debounce: Option<Duration>,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// Skipped when `DOTENV_DISABLED` is `true` or `1`. A missing file is not an error.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Path the file layer reads: explicit, then `GRC_CONFIG_PATH`, then the platform default.
    pub fn resolved_config_path(&self) -> Result<PathBuf, ConfigError> {
        match self.config_path.clone().or_else(config_path_from_env) {
            Some(path) => Ok(path),
            None => default_config_path(),
        }
    }

    /// Read the config file, if one exists.
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        let path = self.resolved_config_path()?;
        if let Some(file) = ConfigFile::read(&path)? {
            self.apply_file(file);
        }
        Ok(self)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if file.base_url.is_some() {
            self.base_url = file.base_url;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        if file.max_retries.is_some() {
            self.max_retries = file.max_retries;
        }
        if file.page_size.is_some() {
            self.page_size = file.page_size;
        }
        if file.max_visible_pages.is_some() {
            self.max_visible_pages = file.max_visible_pages;
        }
        if let Some(ms) = file.search_debounce_ms {
            self.search_debounce = Some(Duration::from_millis(ms));
        }
    }

    /// Read `GRC_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_max_visible_pages(mut self, window: usize) -> Self {
        self.max_visible_pages = Some(window);
        self
    }

    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = Some(debounce);
        self
    }

    /// Validate the merged values and build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = validate_and_normalize_base_url(
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        )?;

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let timeout_secs = timeout.as_secs();
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }
        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {MAX_TIMEOUT_SECS} seconds"
                ),
            });
        }

        let max_retries = self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!("must be between 0 and {MAX_MAX_RETRIES} (got {max_retries})"),
            });
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::InvalidListSettings {
                message: "page_size must be at least 1".to_string(),
            });
        }

        let max_visible_pages = self.max_visible_pages.unwrap_or(DEFAULT_MAX_VISIBLE_PAGES);
        if max_visible_pages == 0 {
            return Err(ConfigError::InvalidListSettings {
                message: "max_visible_pages must be at least 1".to_string(),
            });
        }

        let search_debounce = self
            .search_debounce
            .unwrap_or(Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS));
        if search_debounce > Duration::from_millis(MAX_SEARCH_DEBOUNCE_MS) {
            return Err(ConfigError::InvalidListSettings {
                message: format!(
                    "search_debounce_ms exceeds maximum allowed value of {MAX_SEARCH_DEBOUNCE_MS}"
                ),
            });
        }

        Ok(Config {
            connection: ConnectionConfig {
                base_url,
                timeout,
                max_retries,
            },
            list: ListConfig {
                page_size,
                page_size_options: ListConfig::options_for(page_size),
                max_visible_pages,
                search_debounce,
            },
        })
    }
}

impl ConfigLoader {
    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_page_size(&mut self, page_size: Option<usize>) {
        self.page_size = page_size;
    }

    pub(crate) fn set_max_visible_pages(&mut self, window: Option<usize>) {
        self.max_visible_pages = window;
    }

    pub(crate) fn set_search_debounce(&mut self, debounce: Option<Duration>) {
        self.search_debounce = debounce;
    }
}

fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. http://localhost:3000): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. http://localhost:3000)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
