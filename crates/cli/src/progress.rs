//! Fetch spinner for the CLI.
//!
//! Responsibilities:
//! - Show an indefinite spinner on STDERR while a register request is in flight.
//! - Stay silent when `--quiet` is set (callers pass `enabled = !quiet`).
//!
//! Non-responsibilities:
//! - Printing command results; stdout remains reserved for results.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// An indefinite spinner that clears itself when finished or dropped.
pub(crate) struct Spinner {
    pb: Option<ProgressBar>,
}

impl Spinner {
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        if !enabled {
            return Self { pb: None };
        }

        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(style);
        pb.set_message(label.into());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb: Some(pb) }
    }

    pub(crate) fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}
