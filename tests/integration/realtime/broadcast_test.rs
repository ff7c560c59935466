//! Realtime fan-out tests
//!
//! Service calls against a `MemoryStore` with a subscribed receiver, plus
//! one end-to-end check of the SSE stream.

use assert_matches::assert_matches;
use futures_util::StreamExt;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;
use uuid::Uuid;

use ideadrop::backend::collab::service as collab;
use ideadrop::backend::messaging::service as messaging;
use ideadrop::backend::realtime::broadcast;
use ideadrop::backend::store::{MemoryStore, Store};
use ideadrop::shared::social::{Idea, SendGroupMessageRequest, User, Visibility};
use ideadrop::shared::EventType;

use crate::common::{TestApp, TestUser};

async fn seeded() -> (MemoryStore, User, User, Idea) {
    let store = MemoryStore::new();
    let owner = store.upsert_user(&User::new(Uuid::new_v4(), "olivia")).await.unwrap();
    let bob = store.upsert_user(&User::new(Uuid::new_v4(), "bob")).await.unwrap();
    let idea = Idea::new(owner.id, "Solar kettle", "Boil water with sunlight", Visibility::Public);
    store.insert_idea(&idea).await.unwrap();
    (store, owner, bob, idea)
}

#[tokio::test]
async fn test_request_pushes_to_owner_only() {
    let (store, owner, bob, idea) = seeded().await;
    let tx = broadcast::channel(16);
    let mut rx = tx.subscribe();

    collab::request_collaboration(&store, &tx, &bob, idea.id).await.unwrap();

    let event = rx.try_recv().unwrap();
    assert_eq!(event.event_type, EventType::Notification);
    assert!(event.is_for(owner.id));
    assert!(!event.is_for(bob.id));
    assert_eq!(event.payload["type"], "collab_request");
    assert_eq!(event.payload["recipient_id"], owner.id.to_string());
}

#[tokio::test]
async fn test_refused_request_pushes_nothing() {
    let (store, _owner, bob, idea) = seeded().await;
    let tx = broadcast::channel(16);

    collab::request_collaboration(&store, &tx, &bob, idea.id).await.unwrap();
    let mut rx = tx.subscribe();

    assert!(collab::request_collaboration(&store, &tx, &bob, idea.id).await.is_err());
    assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(store.notification_count().await, 1);
}

#[tokio::test]
async fn test_approve_pushes_to_collaborator() {
    let (store, owner, bob, idea) = seeded().await;
    let tx = broadcast::channel(16);

    collab::request_collaboration(&store, &tx, &bob, idea.id).await.unwrap();
    let collaboration = store.find_collaboration(idea.id, bob.id).await.unwrap().unwrap();

    let mut rx = tx.subscribe();
    collab::resolve_collaboration(&store, &tx, &owner, collaboration.id, Some("approve"))
        .await
        .unwrap();

    let event = rx.try_recv().unwrap();
    assert!(event.is_for(bob.id));
    assert_eq!(event.payload["type"], "collab_approved");

    // Re-approving is silent
    collab::resolve_collaboration(&store, &tx, &owner, collaboration.id, Some("approve"))
        .await
        .unwrap();
    assert_matches!(rx.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_group_message_reaches_every_member() {
    let (store, owner, bob, idea) = seeded().await;
    let tx = broadcast::channel(16);
    collab::request_collaboration(&store, &tx, &bob, idea.id).await.unwrap();
    let collaboration = store.find_collaboration(idea.id, bob.id).await.unwrap().unwrap();
    collab::resolve_collaboration(&store, &tx, &owner, collaboration.id, Some("approve"))
        .await
        .unwrap();

    let mut rx = tx.subscribe();
    let request = SendGroupMessageRequest {
        content: "Hello group".to_string(),
    };
    messaging::send_message(&store, &tx, &bob, idea.id, &request).await.unwrap();

    let event = rx.try_recv().unwrap();
    assert_eq!(event.event_type, EventType::GroupMessage);
    assert!(event.is_for(owner.id));
    assert!(event.is_for(bob.id));
    assert!(!event.is_for(Uuid::new_v4()));
    assert_eq!(event.payload["content"], "Hello group");
}

#[tokio::test]
async fn test_sse_stream_delivers_own_notification() {
    let app = TestApp::new();
    let owner = TestUser::new("olivia");
    let bob = TestUser::new("bob");
    let idea_id = app.create_idea(&owner, "Solar kettle", "public").await;

    let response = app.open(&owner, "/api/realtime?types=notification").await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    assert_eq!(
        response.headers()[axum::http::header::CONTENT_TYPE],
        "text/event-stream"
    );
    let mut frames = response.into_body().into_data_stream();

    app.post_empty(&bob, &format!("/api/ideas/{}/like", idea_id)).await;

    let frame = tokio::time::timeout(Duration::from_secs(5), frames.next())
        .await
        .expect("no event within timeout")
        .expect("stream ended")
        .expect("body error");
    let text = String::from_utf8(frame.to_vec()).unwrap();
    assert!(text.contains("event: notification"), "unexpected frame: {}", text);
    assert!(text.contains("bob liked your idea"), "unexpected frame: {}", text);
}
