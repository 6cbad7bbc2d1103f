//! Ctrl+C handling for in-flight requests.
//!
//! Responsibilities:
//! - Race a client future against the process-wide [`CancellationToken`].
//! - Define the `Cancelled` marker error carried through `anyhow::Result`.
//!
//! Does NOT handle:
//! - Installing the signal handler (see `main`).
//!
//! Invariants:
//! - A cancelled request is dropped, never awaited to completion.
//! - Exit code 130 (128 + SIGINT) is reported for cancelled commands.

use std::fmt;
use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Marker error used to indicate user-driven cancellation.
#[derive(Debug, Clone, Copy)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Await `request` unless `cancel` fires first.
pub async fn cancellable<T, F>(cancel: &CancellationToken, request: F) -> anyhow::Result<T>
where
    F: Future<Output = grc_client::Result<T>>,
{
    tokio::select! {
        res = request => Ok(res?),
        _ = cancel.cancelled() => Err(Cancelled.into()),
    }
}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.is::<Cancelled>()
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}
