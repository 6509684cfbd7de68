//! PortalClient against a mock backend.

use erp_listing::{Issue, Tenant};
use erp_portal::{ApiConfig, PortalClient, PortalError};
use serde_json::json;
use std::collections::BTreeMap;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PortalClient {
    PortalClient::new(&ApiConfig {
        base_url: format!("{}/api", server.uri()),
        api_key: Some("token-123".to_string()),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_bare_array_with_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quality/issues"))
        .and(query_param("status", "open"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Leak in bay 3", "status": "open"},
            {"id": 2, "title": "Broken hinge", "status": "open", "priority": "high"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let issues: Vec<Issue> = client_for(&server)
        .fetch_records("quality/issues", &[("status", "open")])
        .await
        .unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].id, "1");
    assert_eq!(issues[1].priority.as_deref(), Some("high"));
}

#[tokio::test]
async fn test_fetch_data_wrapper_null_and_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/tenants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"name": "Acme", "status": "active", "plan": "pro"},
                {"status": "active"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/archived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::Value::Null))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tenants: Vec<Tenant> = client.fetch_records("admin/tenants", &[]).await.unwrap();
    assert_eq!(tenants.len(), 1);
    assert_eq!(tenants[0].name, "Acme");

    let archived: Vec<Tenant> = client.fetch_records("admin/archived", &[]).await.unwrap();
    assert!(archived.is_empty());
}

#[tokio::test]
async fn test_error_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let missing = client.fetch_records::<Issue>("nowhere", &[]).await;
    assert!(matches!(missing, Err(PortalError::NotFound(_))));

    match client.fetch_records::<Issue>("broken", &[]).await {
        Err(PortalError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_form_validation_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/hr/profile"))
        .and(body_partial_json(json!({"email": "taken@example.com"})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "The given data was invalid.",
            "errors": {"email": ["The email has already been taken."]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/hr/leave"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let values: BTreeMap<String, String> =
        [("email".to_string(), "taken@example.com".to_string())].into_iter().collect();

    match client.submit_form("hr/profile", &values).await {
        Err(PortalError::Validation(errors)) => {
            assert_eq!(errors.get("email"), Some("The email has already been taken."));
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    // 400 without an errors map is a plain server error.
    assert!(matches!(
        client.submit_form("hr/leave", &values).await,
        Err(PortalError::Server { status: 400, .. })
    ));
}
