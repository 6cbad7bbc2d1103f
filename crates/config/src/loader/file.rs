//! JSON config file support.
//!
//! Responsibilities:
//! - Resolve the default config file path via `directories`.
//! - Parse the config file into optional overrides.
//!
//! Does NOT handle:
//! - Validation of the values (see `builder.rs`).
//!
//! Invariants:
//! - A missing config file is not an error; an unreadable or malformed one is.
//! - Unknown keys are ignored so older binaries accept newer files.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::ConfigError;
use crate::constants::{CONFIG_APP_NAME, CONFIG_FILE_NAME};

/// Returns the default path to the configuration file.
///
/// - Linux: `~/.config/grc-register/config.json`
/// - macOS: `~/Library/Application Support/grc-register/config.json`
/// - Windows: `%AppData%\grc-register\config\config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::ProjectDirs::from("", "", CONFIG_APP_NAME)
        .ok_or(ConfigError::ConfigDirUnavailable)?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Values read from the config file. Absent keys fall through to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<usize>,
    pub page_size: Option<usize>,
    pub max_visible_pages: Option<usize>,
    pub search_debounce_ms: Option<u64>,
}

impl ConfigFile {
    /// Read the config file at `path`. Returns `Ok(None)` if it does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found");
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::ConfigFileRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let file = serde_json::from_str(&content).map_err(|source| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(Some(file))
    }
}
