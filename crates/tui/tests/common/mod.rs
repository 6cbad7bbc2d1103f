//! Common test utilities for TUI side effect tests.
//!
//! Each test gets its own wiremock server, a client pointing at it and a
//! fresh action channel.
//!
//! # Invariants
//! - Fixtures are loaded from the client crate's fixtures directory.
//! - Clients never retry, so error tests fail fast.

#![allow(dead_code)]

use std::time::Duration;

use grc_client::{GrcClient, Resource};
use tokio::sync::mpsc::{self, Receiver, Sender};

pub use grc_client::testing::load_fixture;
pub use grc_tui::action::Action;
pub use grc_tui::runtime::side_effects::handle_side_effects;
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock server, client and action channel for one register type.
pub struct SideEffectsTestHarness<T> {
    pub mock_server: MockServer,
    pub client: GrcClient,
    pub action_tx: Sender<Action<T>>,
    pub action_rx: Receiver<Action<T>>,
}

impl<T: Resource> SideEffectsTestHarness<T> {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let client = GrcClient::builder()
            .base_url(mock_server.uri())
            .max_retries(0)
            .build()
            .expect("Failed to build test client");
        let (action_tx, action_rx) = mpsc::channel(100);

        Self {
            mock_server,
            client,
            action_tx,
            action_rx,
        }
    }

    /// Hand `action` to the side-effect runner and wait for the one result it sends.
    ///
    /// The runner itself must return promptly; the API call happens in a spawned task.
    pub async fn handle_and_receive(&mut self, action: Action<T>) -> Action<T> {
        let handled = handle_side_effects(action, self.client.clone(), self.action_tx.clone());
        tokio::time::timeout(Duration::from_millis(100), handled)
            .await
            .expect("handle_side_effects blocked instead of spawning a task");

        tokio::time::timeout(Duration::from_secs(5), self.action_rx.recv())
            .await
            .expect("no result action within 5s")
            .expect("action channel closed")
    }
}
