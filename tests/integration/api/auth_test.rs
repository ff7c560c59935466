//! Authentication API integration tests
//!
//! Every API route refuses requests without a valid bearer token.

use axum::http::{Method, StatusCode};

use crate::common::{assert_error, forged_token, TestApp, TestUser};

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new();
    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let app = TestApp::new();
    for (method, uri) in [
        (Method::GET, "/api/notifications"),
        (Method::GET, "/api/collaborations"),
        (Method::POST, "/api/groups/leave"),
        (Method::GET, "/api/realtime"),
    ] {
        let response = app.request(method, uri, None, None).await;
        assert_error(
            &response,
            StatusCode::UNAUTHORIZED,
            "not_authenticated",
            "Authentication credentials were not provided or are invalid",
        );
    }
}

#[tokio::test]
async fn test_forged_token_is_401() {
    let app = TestApp::new();
    let token = forged_token("mallory");
    let response = app
        .request(Method::GET, "/api/notifications", Some(&token), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_401() {
    let app = TestApp::new();
    let response = app
        .request(Method::GET, "/api/notifications", Some("not.a.jwt"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_registers_user() {
    let app = TestApp::new();
    let alice = TestUser::new("alice");

    let response = app.get(&alice, "/api/notifications").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!([]));

    let idea_id = app.create_idea(&alice, "Solar kettle", "public").await;
    let members = app.get(&alice, &format!("/api/ideas/{}/members", idea_id)).await;
    assert_eq!(members.body["members"][0]["username"], "alice");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new();
    let alice = TestUser::new("alice");
    let response = app.get(&alice, "/api/nowhere").await;
    assert_error(&response, StatusCode::NOT_FOUND, "not_found", "Not found");
}
