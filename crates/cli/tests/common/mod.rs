//! Shared test utilities for grc-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Serve the client crate's JSON fixtures from a mock register API.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.
//! - `GRC_CONFIG_PATH` points at a file that does not exist, so the host's
//!   config file never leaks into a test.

use assert_cmd::Command;
use grc_client::testing::load_fixture;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns a hermetic `grc-cli` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `GRC_*` variables from the host are cleared.
/// - Retries are off so error-path tests fail fast.
pub fn grc_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("grc-cli");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("GRC_CONFIG_PATH", "/nonexistent/grc-cli-test/config.json");
    cmd.env("GRC_MAX_RETRIES", "0");

    cmd.env_remove("GRC_BASE_URL")
        .env_remove("GRC_TIMEOUT")
        .env_remove("GRC_PAGE_SIZE")
        .env_remove("GRC_MAX_VISIBLE_PAGES")
        .env_remove("GRC_SEARCH_DEBOUNCE_MS");

    cmd
}

/// Returns a hermetic `grc-cli` command pointed at `base_url`.
#[allow(dead_code)]
pub fn grc_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = grc_cmd();
    cmd.env("GRC_BASE_URL", base_url);
    cmd
}

/// Mount a `GET <register_path>` mock answering with a fixture.
#[allow(dead_code)]
pub async fn mount_list(server: &MockServer, register_path: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path(register_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture(fixture)))
        .mount(server)
        .await;
}
