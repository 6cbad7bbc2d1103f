//! Create, update and delete endpoint tests.
//!
//! # Invariants
//! - Create POSTs the JSON body to the register path
//! - Update PUTs and delete DELETEs `<path>/<key>` with the key percent-encoded
//! - `success: false` bodies and 404s become errors
//!
//! # What this does NOT handle
//! - Refetch after mutation (the caller's responsibility, see the CLI tests)

mod common;

use common::*;
use grc_client::{ClientError, GrcClient, ResourceKind};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};

fn client_for(server: &MockServer) -> GrcClient {
    GrcClient::builder()
        .base_url(server.uri())
        .max_retries(0)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_create_posts_body() {
    let server = MockServer::start().await;
    let body = json!({
        "asset_id": "AST-0004",
        "asset_name": "Badge Access System",
        "asset_type": "Hardware",
        "classification": "Internal",
        "owner": "Facilities",
        "business_value": "Medium"
    });

    Mock::given(method("POST"))
        .and(path("/api/assets"))
        .and(body_json(&body))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(load_fixture("mutations/created.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .create(ResourceKind::Assets, &body)
        .await
        .unwrap();
    assert_eq!(response.success, Some(true));
    assert_eq!(
        response.data.as_ref().and_then(|d| d.get("asset_id")),
        Some(&json!("AST-0004"))
    );
}

#[tokio::test]
async fn test_create_rejected_by_validation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/assets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("mutations/rejected.json")),
        )
        .mount(&server)
        .await;

    let result = client_for(&server)
        .create(ResourceKind::Assets, &json!({"asset_name": "No key"}))
        .await;
    assert!(matches!(result, Err(ClientError::Unsuccessful(ref m)) if m == "asset_id is required"));
}

#[tokio::test]
async fn test_create_400_surfaces_api_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/gaps-analysis"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": "Assessment ID 99 does not exist in this tenant's cybersecurity_assessments table."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create(ResourceKind::Gaps, &json!({"assessment_id": 99}))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.user_message().contains("Assessment ID 99"));
}

#[tokio::test]
async fn test_update_puts_to_keyed_path() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/governance/controls/11"))
        .and(body_json(json!({"implementation_status": "Implemented"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .update(
            ResourceKind::Controls,
            "11",
            &json!({"implementation_status": "Implemented"}),
        )
        .await
        .unwrap();
    assert_eq!(response.summary("Updated"), "Updated");
}

#[tokio::test]
async fn test_delete_and_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/assets/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("mutations/deleted.json")),
        )
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/assets/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Asset not found"})))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let deleted = client.delete(ResourceKind::Assets, "3").await.unwrap();
    assert_eq!(deleted.summary("Deleted"), "Asset deleted successfully");

    let missing = client.delete(ResourceKind::Assets, "999").await;
    assert!(matches!(missing, Err(ClientError::NotFound(ref m)) if m == "assets 999"));
}

#[tokio::test]
async fn test_delete_encodes_key() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/audit/reports/RPT%202024%2F1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .delete(ResourceKind::Reports, "RPT 2024/1")
        .await
        .unwrap();
    assert_eq!(response.success, None);
}
