//! UI rendering modules for the TUI.
//!
//! Rendering reads [`App`](crate::app::App) state and never mutates it.

pub mod list;
pub mod theme;
pub mod toast;

pub use theme::Theme;
pub use toast::{Toast, ToastLevel};

/// Height of the summary-card header.
pub const HEADER_HEIGHT: u16 = 6;

/// Height of the footer (range label, page bar and key hints).
pub const FOOTER_HEIGHT: u16 = 3;
