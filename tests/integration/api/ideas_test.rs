//! Idea, like and comment API tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{assert_error, TestApp, TestUser};

#[tokio::test]
async fn test_create_idea() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");

    let response = app
        .post(
            &owner,
            "/api/ideas",
            json!({ "title": "  Solar kettle ", "description": "Boil water with sunlight" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["title"], "Solar kettle");
    assert_eq!(response.body["visibility"], "private");
    assert_eq!(response.body["owner_id"], owner.id.to_string());
}

#[tokio::test]
async fn test_create_idea_validation() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");

    let blank = app
        .post(&owner, "/api/ideas", json!({ "title": " ", "description": "d" }))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.body["field"], "title");

    let bad_visibility = app
        .post(
            &owner,
            "/api/ideas",
            json!({ "title": "t", "description": "d", "visibility": "secret" }),
        )
        .await;
    assert_eq!(bad_visibility.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_visibility.body["code"], "validation_error");
}

#[tokio::test]
async fn test_private_idea_hidden_from_outsiders() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let stranger = TestUser::new("sam");
    let idea_id = app.create_idea(&owner, "Solar kettle", "private").await;
    app.add_member(&owner, &bob, idea_id).await;
    let uri = format!("/api/ideas/{}", idea_id);

    assert_eq!(app.get(&owner, &uri).await.status, StatusCode::OK);
    assert_eq!(app.get(&bob, &uri).await.status, StatusCode::OK);
    let hidden = app.get(&stranger, &uri).await;
    assert_error(&hidden, StatusCode::NOT_FOUND, "not_found", "Idea not found");
}

#[tokio::test]
async fn test_partial_idea_hides_description() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let stranger = TestUser::new("sam");
    let idea_id = app.create_idea(&owner, "Solar kettle", "partial").await;
    let uri = format!("/api/ideas/{}", idea_id);

    let outsider = app.get(&stranger, &uri).await;
    assert_eq!(outsider.status, StatusCode::OK);
    assert_eq!(outsider.body["title"], "Solar kettle");
    assert_eq!(outsider.body["description"], "");

    let own = app.get(&owner, &uri).await;
    assert_eq!(own.body["description"], "All about Solar kettle");
}

#[tokio::test]
async fn test_public_idea_visible_to_all() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let stranger = TestUser::new("sam");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    let response = app.get(&stranger, &format!("/api/ideas/{}", idea_id)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["description"], "All about Solar kettle");
}

#[tokio::test]
async fn test_delete_idea_cascades() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    app.add_member(&owner, &bob, idea_id).await;
    let uri = format!("/api/ideas/{}", idea_id);

    let refused = app.delete(&bob, &uri).await;
    assert_error(
        &refused,
        StatusCode::NOT_FOUND,
        "not_found",
        "Idea not found or you don't have permission",
    );

    let deleted = app.delete(&owner, &uri).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(app.store.collaboration_count().await, 0);
    assert_eq!(app.get(&owner, &uri).await.status, StatusCode::NOT_FOUND);
    assert!(app.notifications(&bob).await.is_empty());
}

#[tokio::test]
async fn test_toggle_like_notifies_once() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    let uri = format!("/api/ideas/{}/like", idea_id);

    let liked = app.post_empty(&bob, &uri).await;
    assert_eq!(liked.status, StatusCode::CREATED);
    assert_eq!(liked.body, json!({ "message": "Idea liked", "like_count": 1, "is_liked": true }));

    let unliked = app.post_empty(&bob, &uri).await;
    assert_eq!(unliked.status, StatusCode::OK);
    assert_eq!(unliked.body, json!({ "message": "Idea unliked", "like_count": 0, "is_liked": false }));

    let notes = app.notifications(&owner).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["type"], "like");
    assert_eq!(notes[0]["message"], "bob liked your idea 'Solar kettle'");
    assert!(notes[0]["collab_id"].is_null());
}

#[tokio::test]
async fn test_owner_like_is_not_notified() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    let liked = app.post_empty(&owner, &format!("/api/ideas/{}/like", idea_id)).await;
    assert_eq!(liked.status, StatusCode::CREATED);
    assert!(app.notifications(&owner).await.is_empty());
}

#[tokio::test]
async fn test_comment() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    let uri = format!("/api/ideas/{}/comments", idea_id);

    let response = app.post(&bob, &uri, json!({ "content": " Love it " })).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["content"], "Love it");
    assert_eq!(response.body["user_id"], bob.id.to_string());

    let notes = app.notifications(&owner).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["type"], "comment");

    let blank = app.post(&bob, &uri, json!({ "content": "" })).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.notifications(&owner).await.len(), 1);
}

#[tokio::test]
async fn test_like_and_comment_on_missing_idea() {
    let app = TestApp::new();
    let bob = TestUser::new("bob");
    let missing = Uuid::new_v4();

    let like = app.post_empty(&bob, &format!("/api/ideas/{}/like", missing)).await;
    assert_error(&like, StatusCode::NOT_FOUND, "not_found", "Idea not found");

    let comment = app
        .post(&bob, &format!("/api/ideas/{}/comments", missing), json!({ "content": "hi" }))
        .await;
    assert_eq!(comment.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_edits_idea() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;
    let uri = format!("/api/ideas/{}", idea_id);

    let refused = app.patch(&bob, &uri, json!({ "title": "Mine now" })).await;
    assert_error(
        &refused,
        StatusCode::NOT_FOUND,
        "not_found",
        "Idea not found or you don't have permission",
    );

    let edited = app
        .patch(&owner, &uri, json!({ "title": " Solar oven ", "visibility": "private" }))
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["title"], "Solar oven");
    assert_eq!(edited.body["visibility"], "private");
    assert_eq!(edited.body["description"], "All about Solar kettle");

    // Now private, so bob no longer sees it at all
    assert_eq!(app.get(&bob, &uri).await.status, StatusCode::NOT_FOUND);

    let bad = app.patch(&owner, &uri, json!({ "visibility": "secret" })).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad.body["code"], "validation_error");
    assert_eq!(app.get(&owner, &uri).await.body["visibility"], "private");
}
