//! Configuration management for the GRC register tools.
//!
//! This crate provides the configuration types shared by the CLI and TUI and
//! a loader that merges defaults, a JSON config file, `.env` and `GRC_*`
//! environment variables.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigFile, ConfigLoader, default_config_path, env_var_or_none};
pub use types::{Config, ConnectionConfig, ListConfig};
