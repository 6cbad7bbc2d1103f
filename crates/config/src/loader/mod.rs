//! Configuration loader for defaults, config files, `.env` and environment variables.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Read the optional JSON config file from the platform config directory.
//! - Enforce the `DOTENV_DISABLED` gate before loading `.env`.
//!
//! Does NOT handle:
//! - Writing configuration back to disk.
//! - Command-line parsing (the binaries apply their flags through the builder).
//!
//! Invariants / Assumptions:
//! - Precedence is builder calls > environment > config file > defaults.
//! - `load_dotenv()` must be called explicitly to enable `.env` loading.
//! - Validation happens once, in `build()`.

mod builder;
mod env;
mod error;
mod file;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
pub use file::{ConfigFile, default_config_path};
