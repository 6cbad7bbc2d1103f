//! Terminal setup and restoration.
//!
//! Responsibilities:
//! - Enter raw mode and the alternate screen, with optional mouse capture.
//! - Restore the terminal when the session ends, including on panic.
//!
//! Invariants:
//! - [`TerminalGuard`] lives for the whole TUI session.
//! - Restoration never panics; errors during cleanup are ignored.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Restores the terminal on drop.
pub struct TerminalGuard {
    mouse_captured: bool,
}

impl TerminalGuard {
    /// Put the terminal into TUI mode and return the guard with a ratatui terminal.
    pub fn enter(no_mouse: bool) -> io::Result<(Self, Tui)> {
        enable_raw_mode()?;
        // Build the guard first so a failure below still restores raw mode.
        let guard = Self {
            mouse_captured: !no_mouse,
        };

        let mut stdout = io::stdout();
        if guard.mouse_captured {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok((guard, terminal))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        if self.mouse_captured {
            let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        } else {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
    }
}
