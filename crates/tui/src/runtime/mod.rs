//! Runtime components for the TUI application.
//!
//! - Terminal setup and restoration ([`terminal`])
//! - Configuration loading with CLI overrides ([`config`])
//! - Async side effect handlers for API calls ([`side_effects`])
//!
//! Does NOT handle:
//! - UI rendering or input handling (see `grc_tui::app` and `grc_tui::ui`).
//! - HTTP or envelope parsing (see `grc_client`).
//!
//! Invariants:
//! - Side effects run in separate tokio tasks to avoid blocking the UI.

pub mod config;
pub mod side_effects;
pub mod terminal;
