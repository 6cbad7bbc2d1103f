//! Common test utilities for integration tests.
//!
//! Shared helpers and re-exports for driving the register client against a
//! wiremock server.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON

use std::time::Duration;

#[allow(unused_imports)]
pub use grc_client::endpoints;
#[allow(unused_imports)]
pub use grc_client::testing::load_fixture;
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Advance Tokio's paused clock and yield so sleepers can observe the change.
#[allow(dead_code)]
pub async fn advance_and_yield(duration: Duration) {
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
}

/// Assert that a task has not completed after yielding to the scheduler.
#[allow(dead_code)]
pub async fn assert_pending<T>(handle: &tokio::task::JoinHandle<T>, context: &str) {
    tokio::task::yield_now().await;
    assert!(!handle.is_finished(), "Expected pending task: {}", context);
}
