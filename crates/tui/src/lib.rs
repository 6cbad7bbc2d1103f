//! GRC register TUI library.
//!
//! Application state, action protocol, rendering and runtime plumbing for the
//! terminal register browser. The binary in `main.rs` wires these together.
//!
//! ```rust,ignore
//! use grc_tui::{Action, App};
//! use grc_client::Asset;
//!
//! let mut app: App<Asset> = App::new(grc_config::ListConfig::default());
//! let fetch = app.refresh();
//! ```

pub mod action;
pub mod app;
pub mod cli;
pub mod runtime;
pub mod ui;

pub use action::{Action, FetchedRecords};
pub use app::{App, Focus};
pub use ui::{FOOTER_HEIGHT, HEADER_HEIGHT, Toast, ToastLevel};
