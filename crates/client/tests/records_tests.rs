//! Register list endpoint tests.
//!
//! # Invariants
//! - Every register's envelope shape yields its typed records
//! - Search and non-`All` filters are sent as query parameters; `All` is never sent
//! - Server pagination is surfaced when present
//! - Malformed rows are skipped, not fatal
//! - `success: false` and `{ error }` bodies become errors

mod common;

use common::*;
use grc_client::{
    Asset, AuditEngagement, AuditReport, ClientError, ComplianceGap, Control, Finding,
    GrcClient, ListQuery, ResourceKind, VendorRiskEvaluation,
};
use grc_listview::{FilterSpec, Record};
use wiremock::matchers::{method, path, query_param};

async fn mount_fixture(server: &MockServer, route: &str, fixture: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture(fixture)))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> GrcClient {
    GrcClient::builder()
        .base_url(server.uri())
        .max_retries(0)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_assets_from_collection_key() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/api/assets", "assets/list_assets.json").await;

    let page = client_for(&server)
        .list::<Asset>(&ListQuery::new())
        .await
        .unwrap();

    let ids: Vec<String> = page.records.iter().map(|a| a.record_id()).collect();
    assert_eq!(ids, ["AST-0001", "AST-0002", "AST-0003"]);
    assert_eq!(page.pagination, None);
    assert_eq!(page.skipped, 0);
    assert_eq!(page.records[0].confidentiality_level.as_deref(), Some("3"));
}

#[tokio::test]
async fn test_list_every_register() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/api/findings", "findings/list_findings.json").await;
    mount_fixture(&server, "/api/governance/controls", "controls/list_controls.json").await;
    mount_fixture(
        &server,
        "/api/audit/planning/engagements",
        "engagements/list_engagements.json",
    )
    .await;
    mount_fixture(&server, "/api/audit/reports", "reports/list_reports.json").await;
    mount_fixture(&server, "/api/gaps-analysis", "gaps/list_gaps.json").await;
    mount_fixture(
        &server,
        "/api/third-party-risk-evaluations",
        "vendor_evaluations/list_evaluations.json",
    )
    .await;

    let client = client_for(&server);
    let query = ListQuery::new();

    let findings = client.list::<Finding>(&query).await.unwrap();
    assert_eq!(findings.records.len(), 3);
    assert_eq!(findings.records[2].assessment_id.as_deref(), Some("9"));

    let controls = client.list::<Control>(&query).await.unwrap();
    assert_eq!(
        controls.records[1].control_measures,
        Some(vec!["MFA".to_string(), "SSO".to_string()])
    );

    let engagements = client.list::<AuditEngagement>(&query).await.unwrap();
    assert_eq!(engagements.records.len(), 2);
    assert_eq!(engagements.pagination.map(|p| p.total_pages), Some(3));

    let reports = client.list::<AuditReport>(&query).await.unwrap();
    assert_eq!(reports.records[0].record_id(), "RPT-2024-004");

    let gaps = client.list::<ComplianceGap>(&query).await.unwrap();
    assert_eq!(gaps.records.len(), 3);

    let evaluations = client.list::<VendorRiskEvaluation>(&query).await.unwrap();
    assert_eq!(evaluations.records[1].overall_score, Some(31.0));
    assert_eq!(evaluations.pagination.map(|p| p.total), Some(2));
}

#[tokio::test]
async fn test_search_and_filters_sent_as_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/governance/controls"))
        .and(query_param("search", "access"))
        .and(query_param("status", "Implemented"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("controls/list_controls.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let filters = FilterSpec::new()
        .with("implementation_status", "Implemented")
        .with("framework", "All");
    let query = ListQuery::for_view(ResourceKind::Controls, "access", &filters);

    let page = client_for(&server).list::<Control>(&query).await.unwrap();
    assert_eq!(page.records.len(), 2);

    let requests = server.received_requests().await.unwrap();
    let query_string = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query_string.contains("framework"), "All must not be sent: {query_string}");
}

#[tokio::test]
async fn test_malformed_rows_are_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "assets": [
                {"asset_id": "AST-1", "asset_name": "Good"},
                {"asset_name": "No key"},
                {"asset_id": "AST-3", "confidentiality_level": {"nested": true}}
            ]
        })))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list::<Asset>(&ListQuery::new())
        .await
        .unwrap();
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.skipped, 2);
}

#[tokio::test]
async fn test_loose_rows_for_any_register() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/api/gaps-analysis", "gaps/list_gaps.json").await;

    let page = client_for(&server)
        .list_rows(ResourceKind::Gaps, &ListQuery::new())
        .await
        .unwrap();
    let ids: Vec<String> = page.records.iter().map(|r| r.record_id()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[tokio::test]
async fn test_loose_rows_use_register_id_field() {
    let server = MockServer::start().await;
    mount_fixture(&server, "/api/audit/reports", "reports/list_reports.json").await;

    let page = client_for(&server)
        .list_rows(ResourceKind::Reports, &ListQuery::new())
        .await
        .unwrap();
    let row = &page.records[0];
    assert_eq!(row.id_field(), "report_id");
    assert_eq!(row.record_id(), "RPT-2024-004");
    assert_eq!(
        row.field("engagement_id").map(|v| v.to_string()),
        Some("ENG-2024-001".to_string())
    );
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/findings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": false, "error": "tenant offline"})),
        )
        .mount(&server)
        .await;

    let result = client_for(&server)
        .list::<Finding>(&ListQuery::new())
        .await;
    assert!(matches!(result, Err(ClientError::Unsuccessful(ref m)) if m == "tenant offline"));
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/findings"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("x-request-id", "req-42")
                .set_body_json(serde_json::json!({"error": "Failed to fetch findings"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list::<Finding>(&ListQuery::new())
        .await
        .unwrap_err();
    match err {
        ClientError::ApiError {
            status,
            message,
            request_id,
            ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to fetch findings");
            assert_eq!(request_id.as_deref(), Some("req-42"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = endpoints::list_records::<Asset>(
        &Client::new(),
        &server.uri(),
        ResourceKind::Assets,
        &ListQuery::new(),
        0,
        None,
    )
    .await;
    assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
}
