//! Single-slot debounce for search-triggered work.
//!
//! [`Debouncer`] is tick-driven for event loops that already poll on an
//! interval: `trigger` on each keystroke, `poll` on each tick. Triggering
//! supersedes whatever was pending, so only the most recent trigger fires.
//! Nothing here spawns or sleeps; the caller supplies `now`.

use std::time::{Duration, Instant};

/// Identifies one scheduled firing. Stale tokens fail [`Debouncer::is_current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceToken(u64);

/// Tick-driven single-slot debounce.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a firing `delay` after `now`, superseding any pending one.
    pub fn trigger(&mut self, now: Instant) -> DebounceToken {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(now + self.delay);
        DebounceToken(self.generation)
    }

    /// Returns the pending token once its quiescence window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<DebounceToken> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(DebounceToken(self.generation))
            }
            _ => None,
        }
    }

    /// Drop the pending firing. Outstanding tokens become stale.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether work started under `token` should still be honored.
    pub fn is_current(&self, token: DebounceToken) -> bool {
        token.0 == self.generation
    }
}
