//! Notification API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::common::{assert_error, assert_message, parse_id, TestApp, TestUser};

#[tokio::test]
async fn test_notifications_newest_first() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let carol = TestUser::new("carol");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    app.request_collaboration(&owner, &bob, idea_id).await;
    app.post_empty(&carol, &format!("/api/ideas/{}/like", idea_id)).await;

    let notes = app.notifications(&owner).await;
    let kinds: Vec<_> = notes.iter().map(|n| n["type"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["like", "collab_request"]);
}

#[tokio::test]
async fn test_mark_read_by_recipient() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    app.request_collaboration(&owner, &bob, idea_id).await;

    let id = parse_id(&app.notifications(&owner).await[0]["id"]);
    let uri = format!("/api/notifications/{}/read", id);

    // Someone else's notification does not exist for bob
    let refused = app.post_empty(&bob, &uri).await;
    assert_error(&refused, StatusCode::NOT_FOUND, "not_found", "Notification not found");
    assert_eq!(app.notifications(&owner).await[0]["is_read"], false);

    let response = app.post_empty(&owner, &uri).await;
    assert_message(&response, StatusCode::OK, "Notification marked as read");
    assert_eq!(app.notifications(&owner).await[0]["is_read"], true);

    // Marking twice is fine
    let again = app.post_empty(&owner, &uri).await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_mark_unknown_notification() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let response = app
        .post_empty(&owner, &format!("/api/notifications/{}/read", Uuid::new_v4()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notifications_are_private() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let carol = TestUser::new("carol");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    app.add_member(&owner, &bob, idea_id).await;

    assert_eq!(app.notifications(&owner).await.len(), 1);
    assert_eq!(app.notifications(&bob).await.len(), 1);
    assert!(app.notifications(&carol).await.is_empty());
}
