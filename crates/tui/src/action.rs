//! Action protocol for async TUI event handling.
//!
//! Actions represent both user input and the results of background API work.
//! They flow through a bounded channel from the input task and from spawned
//! fetch or mutation tasks into [`App::update`](crate::app::App::update).

use crossterm::event::KeyEvent;
use grc_client::ListQuery;

/// Records delivered by one fetch, plus the number of malformed rows skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRecords<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Unified action type for the register screen.
#[derive(Debug, Clone)]
pub enum Action<T> {
    /// Quit the application
    Quit,
    /// Raw keyboard input event
    Input(KeyEvent),
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),

    /// Fetch the register. `generation` tags the request so stale
    /// responses can be told apart from the latest one.
    FetchRecords { generation: u64, query: ListQuery },
    /// Result of a fetch
    RecordsLoaded {
        generation: u64,
        result: Result<FetchedRecords<T>, String>,
    },

    /// Delete the record with this mutation key
    DeleteRecord(String),
    /// Result of a mutation: the server message or the error text
    MutationComplete(Result<String, String>),
}

impl<T> Action<T> {
    /// True for actions that must be handed to the side-effect runner.
    pub fn is_side_effect(&self) -> bool {
        matches!(
            self,
            Action::FetchRecords { .. } | Action::DeleteRecord(_)
        )
    }
}
