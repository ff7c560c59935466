//! Collaboration lifecycle API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::common::{assert_error, assert_message, parse_id, TestApp, TestUser};

#[tokio::test]
async fn test_request_notifies_owner_with_collab_id() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    let response = app
        .post_empty(&bob, &format!("/api/ideas/{}/collaborate", idea_id))
        .await;
    assert_message(&response, StatusCode::CREATED, "Collaboration request sent");

    let notifications = app.notifications(&owner).await;
    assert_eq!(notifications.len(), 1);
    let n = &notifications[0];
    assert_eq!(n["type"], "collab_request");
    assert_eq!(n["is_read"], false);
    assert_eq!(n["sender"]["username"], "bob");
    assert_eq!(n["idea"]["title"], "Solar kettle");
    assert_eq!(n["message"], "bob requested to collaborate on your idea 'Solar kettle'");
    assert!(n["collab_id"].is_string());

    // The requester hears nothing about their own request
    assert!(app.notifications(&bob).await.is_empty());
}

#[tokio::test]
async fn test_request_on_missing_idea_is_404() {
    let app = TestApp::new();
    let bob = TestUser::new("bob");
    let response = app
        .post_empty(&bob, &format!("/api/ideas/{}/collaborate", Uuid::new_v4()))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "not_found", "Idea not found");
}

#[tokio::test]
async fn test_request_on_own_idea_is_refused() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    let response = app
        .post_empty(&owner, &format!("/api/ideas/{}/collaborate", idea_id))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "self_action");
    assert!(app.notifications(&owner).await.is_empty());
}

#[tokio::test]
async fn test_duplicate_request_is_refused() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    let uri = format!("/api/ideas/{}/collaborate", idea_id);

    assert_eq!(app.post_empty(&bob, &uri).await.status, StatusCode::CREATED);
    let second = app.post_empty(&bob, &uri).await;
    assert_error(
        &second,
        StatusCode::BAD_REQUEST,
        "duplicate_request",
        "Collaboration request already exists",
    );
    assert_eq!(app.store.collaboration_count().await, 1);
    assert_eq!(app.notifications(&owner).await.len(), 1);
}

#[tokio::test]
async fn test_approve_makes_member_and_notifies_collaborator() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "private").await;

    let collab_id = app.request_collaboration(&owner, &bob, idea_id).await;
    let response = app.resolve(&owner, collab_id, "approve").await;
    assert_message(&response, StatusCode::OK, "Collaboration approved");

    let bob_notes = app.notifications(&bob).await;
    assert_eq!(bob_notes.len(), 1);
    assert_eq!(bob_notes[0]["type"], "collab_approved");
    assert_eq!(
        bob_notes[0]["message"],
        "Your collaboration request for 'Solar kettle' was approved"
    );

    // Once resolved there is no pending row to link to
    let owner_notes = app.notifications(&owner).await;
    assert!(owner_notes[0]["collab_id"].is_null());

    let members = app.get(&bob, &format!("/api/ideas/{}/members", idea_id)).await;
    assert_eq!(members.status, StatusCode::OK);
    let names: Vec<_> = members.body["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["username"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["olivia", "bob"]);
}

#[tokio::test]
async fn test_reject_then_request_again() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    let collab_id = app.request_collaboration(&owner, &bob, idea_id).await;
    let response = app.resolve(&owner, collab_id, "reject").await;
    assert_message(&response, StatusCode::OK, "Collaboration rejected");

    let bob_notes = app.notifications(&bob).await;
    assert_eq!(bob_notes[0]["type"], "collab_rejected");

    // Rejected members have no group access
    let messages = app.get(&bob, &format!("/api/ideas/{}/messages", idea_id)).await;
    assert_error(&messages, StatusCode::FORBIDDEN, "authorization_error", "Not authorized");

    // Asking again reuses the same row
    let again = app.request_collaboration(&owner, &bob, idea_id).await;
    assert_eq!(again, collab_id);
    assert_eq!(app.store.collaboration_count().await, 1);

    let owner_notes = app.notifications(&owner).await;
    assert_eq!(owner_notes.len(), 2);
    assert!(owner_notes.iter().all(|n| n["type"] == "collab_request"));
}

#[tokio::test]
async fn test_reapprove_is_silent_noop() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    let collab_id = app.add_member(&owner, &bob, idea_id).await;

    let response = app.resolve(&owner, collab_id, "approve").await;
    assert_message(&response, StatusCode::OK, "Collaboration approved");
    assert_eq!(app.notifications(&bob).await.len(), 1);
}

#[tokio::test]
async fn test_owner_can_reject_accepted_member() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    let collab_id = app.add_member(&owner, &bob, idea_id).await;

    let response = app.resolve(&owner, collab_id, "reject").await;
    assert_eq!(response.status, StatusCode::OK);

    let members = app.get(&owner, &format!("/api/ideas/{}/members", idea_id)).await;
    assert_eq!(members.body["members"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_resolve_by_non_owner_is_404() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    let collab_id = app.request_collaboration(&owner, &bob, idea_id).await;

    let response = app.resolve(&bob, collab_id, "approve").await;
    assert_error(
        &response,
        StatusCode::NOT_FOUND,
        "not_found",
        "Collaboration not found or you are not the owner",
    );
    assert!(app.notifications(&bob).await.is_empty());
}

#[tokio::test]
async fn test_resolve_unknown_collaboration_is_404() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let response = app.resolve(&owner, Uuid::new_v4(), "approve").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resolve_with_bad_action() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    let collab_id = app.request_collaboration(&owner, &bob, idea_id).await;

    let response = app.resolve(&owner, collab_id, "maybe").await;
    assert_error(&response, StatusCode::BAD_REQUEST, "invalid_action", "Invalid action");

    let missing = app
        .post_empty(&owner, &format!("/api/collaborations/{}/resolve", collab_id))
        .await;
    assert_error(&missing, StatusCode::BAD_REQUEST, "invalid_action", "Invalid action");

    // Still pending
    let notes = app.notifications(&owner).await;
    assert_eq!(parse_id(&notes[0]["collab_id"]), collab_id);
}

#[tokio::test]
async fn test_list_collaborations_scoped_to_actor() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let carol = TestUser::new("carol");
    let stranger = TestUser::new("sam");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    app.add_member(&owner, &bob, idea_id).await;
    app.request_collaboration(&owner, &carol, idea_id).await;

    let for_owner = app.get(&owner, "/api/collaborations").await;
    assert_eq!(for_owner.status, StatusCode::OK);
    let rows = for_owner.body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["collaborator"]["username"], "bob");
    assert_eq!(rows[0]["status"], "accepted");
    assert_eq!(rows[0]["idea"]["title"], "Solar kettle");

    let for_bob = app.get(&bob, "/api/collaborations").await;
    assert_eq!(for_bob.body.as_array().unwrap().len(), 1);

    // A pending requester still sees the idea's accepted rows
    let for_carol = app.get(&carol, "/api/collaborations").await;
    let rows = for_carol.body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["collaborator"]["username"], "bob");

    let for_stranger = app.get(&stranger, "/api/collaborations").await;
    assert_eq!(for_stranger.body, serde_json::json!([]));
}
