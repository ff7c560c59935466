//! Group membership and messaging API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{assert_error, assert_message, TestApp, TestUser};

#[tokio::test]
async fn test_members_need_group_access() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let stranger = TestUser::new("sam");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    let response = app.get(&stranger, &format!("/api/ideas/{}/members", idea_id)).await;
    assert_error(&response, StatusCode::FORBIDDEN, "authorization_error", "Not authorized");

    let missing = app.get(&owner, &format!("/api/ideas/{}/members", Uuid::new_v4())).await;
    assert_error(&missing, StatusCode::NOT_FOUND, "not_found", "Idea not found");
}

#[tokio::test]
async fn test_owner_removes_member() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    app.add_member(&owner, &bob, idea_id).await;

    let response = app
        .post(&owner, "/api/groups/remove-member", json!({ "idea_id": idea_id, "member_id": bob.id }))
        .await;
    assert_message(&response, StatusCode::OK, "Member removed successfully");
    assert_eq!(app.store.collaboration_count().await, 0);

    let messages = app.get(&bob, &format!("/api/ideas/{}/messages", idea_id)).await;
    assert_eq!(messages.status, StatusCode::FORBIDDEN);

    // Removing again finds nothing
    let again = app
        .post(&owner, "/api/groups/remove-member", json!({ "idea_id": idea_id, "member_id": bob.id }))
        .await;
    assert_error(&again, StatusCode::NOT_FOUND, "not_found", "Idea or member not found");
}

#[tokio::test]
async fn test_removed_member_can_request_again() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    let first = app.add_member(&owner, &bob, idea_id).await;

    app.post(&owner, "/api/groups/remove-member", json!({ "idea_id": idea_id, "member_id": bob.id }))
        .await;

    let second = app.request_collaboration(&owner, &bob, idea_id).await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_only_owner_removes_members() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let carol = TestUser::new("carol");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    app.add_member(&owner, &bob, idea_id).await;
    app.add_member(&owner, &carol, idea_id).await;

    let response = app
        .post(&bob, "/api/groups/remove-member", json!({ "idea_id": idea_id, "member_id": carol.id }))
        .await;
    assert_error(&response, StatusCode::FORBIDDEN, "authorization_error", "Only owner can remove members");
    assert_eq!(app.store.collaboration_count().await, 2);
}

#[tokio::test]
async fn test_owner_cannot_be_removed() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    let response = app
        .post(&owner, "/api/groups/remove-member", json!({ "idea_id": idea_id, "member_id": owner.id }))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_member_requires_both_ids() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    let response = app
        .post(&owner, "/api/groups/remove-member", json!({ "idea_id": idea_id }))
        .await;
    assert_error(
        &response,
        StatusCode::BAD_REQUEST,
        "validation_error",
        "idea_id and member_id required",
    );
    assert_eq!(response.body["field"], "member_id");

    let empty = app.post_empty(&owner, "/api/groups/remove-member").await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_member_leaves() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    app.add_member(&owner, &bob, idea_id).await;

    let response = app.post(&bob, "/api/groups/leave", json!({ "idea_id": idea_id })).await;
    assert_message(&response, StatusCode::OK, "You left the group");

    let again = app.post(&bob, "/api/groups/leave", json!({ "idea_id": idea_id })).await;
    assert_error(&again, StatusCode::NOT_FOUND, "not_found", "You are not a member of this group");
}

#[tokio::test]
async fn test_pending_requester_cannot_leave() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    app.request_collaboration(&owner, &bob, idea_id).await;

    let response = app.post(&bob, "/api/groups/leave", json!({ "idea_id": idea_id })).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.collaboration_count().await, 1);
}

#[tokio::test]
async fn test_leave_requires_idea_id() {
    let app = TestApp::new();
    let bob = TestUser::new("bob");
    let response = app.post(&bob, "/api/groups/leave", json!({})).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "validation_error", "idea_id required");
}

#[tokio::test]
async fn test_group_messages() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let stranger = TestUser::new("sam");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    app.add_member(&owner, &bob, idea_id).await;
    let uri = format!("/api/ideas/{}/messages", idea_id);

    let first = app.post(&owner, &uri, json!({ "content": "  Welcome aboard  " })).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["content"], "Welcome aboard");
    assert_eq!(first.body["sender"]["username"], "olivia");

    let second = app.post(&bob, &uri, json!({ "content": "Thanks!" })).await;
    assert_eq!(second.status, StatusCode::CREATED);

    let history = app.get(&bob, &uri).await;
    assert_eq!(history.status, StatusCode::OK);
    let contents: Vec<_> = history
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(contents, vec!["Welcome aboard", "Thanks!"]);

    let outsider = app.post(&stranger, &uri, json!({ "content": "hi" })).await;
    assert_error(&outsider, StatusCode::FORBIDDEN, "authorization_error", "Not authorized");
    let outsider_read = app.get(&stranger, &uri).await;
    assert_eq!(outsider_read.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_blank_message_rejected() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    let response = app
        .post(&owner, &format!("/api/ideas/{}/messages", idea_id), json!({ "content": "   " }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "validation_error");
    assert_eq!(response.body["field"], "content");
}

#[tokio::test]
async fn test_messages_on_missing_idea() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let response = app
        .get(&owner, &format!("/api/ideas/{}/messages", Uuid::new_v4()))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "not_found", "Idea not found");
}
