//! Async side effect handlers for TUI actions.
//!
//! Responsibilities:
//! - Run fetches and deletes in background tasks so the UI never blocks.
//! - Send the outcome back over the action channel.
//!
//! Does NOT handle:
//! - Application state changes (the result actions do that in `App::update`).
//! - Retry of throttled requests (done inside `grc_client`).
//!
//! Invariants:
//! - Every handled action spawns exactly one task, which sends exactly one result.
//! - A fetch result carries the generation of the request that produced it.

use grc_client::{GrcClient, Resource};
use tokio::sync::mpsc::Sender;
use tracing::{debug, warn};

use crate::action::{Action, FetchedRecords};

/// Spawn the API work for `action`. Actions without side effects are ignored.
pub async fn handle_side_effects<T: Resource>(
    action: Action<T>,
    client: GrcClient,
    tx: Sender<Action<T>>,
) {
    match action {
        Action::FetchRecords { generation, query } => {
            tokio::spawn(async move {
                let result = match client.list::<T>(&query).await {
                    Ok(page) => {
                        debug!(
                            register = %T::KIND,
                            generation,
                            records = page.records.len(),
                            "Fetch complete"
                        );
                        Ok(FetchedRecords {
                            records: page.records,
                            skipped: page.skipped,
                        })
                    }
                    Err(e) => {
                        warn!(register = %T::KIND, generation, error = %e, "Fetch failed");
                        Err(e.to_string())
                    }
                };
                let _ = tx.send(Action::RecordsLoaded { generation, result }).await;
            });
        }
        Action::DeleteRecord(key) => {
            tokio::spawn(async move {
                let result = match client.delete(T::KIND, &key).await {
                    Ok(response) => {
                        let fallback = format!("Deleted '{}' from {}", key, T::KIND.noun());
                        Ok(response.summary(&fallback))
                    }
                    Err(e) => {
                        warn!(register = %T::KIND, key = %key, error = %e, "Delete failed");
                        Err(e.to_string())
                    }
                };
                let _ = tx.send(Action::MutationComplete(result)).await;
            });
        }
        _ => {}
    }
}
