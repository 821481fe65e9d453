//! Upload relay integration tests
//!
//! POST /upload against a fake object store.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{file_form, text_form, TestApp, TestOptions};

#[tokio::test]
async fn test_upload_success() {
    let app = TestApp::new();
    let mut client = app.registered_client("ada@example.com", "pw123").await;
    let user = app.store_user("ada@example.com").await;

    let (content_type, body) = file_form("cat.png", "image/png", b"\x89PNG fake image");
    let response = client.post_multipart("/upload", content_type, body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"success": true}));

    let received = app.storage.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].body, b"\x89PNG fake image");
    assert_eq!(received[0].content_type, "image/png");
    assert_eq!(received[0].content_length, 15);
    assert!(received[0].key.ends_with(".png"));
    assert_eq!(received[0].key.len(), 32 + 4);

    let records = app.uploads_for(user).await;
    assert_eq!(records, vec![received[0].key.clone()]);

    assert_eq!(app.spooled_files(), 0);
}

#[tokio::test]
async fn test_upload_storage_failure() {
    let app = TestApp::with_options(TestOptions {
        storage_status: 403,
        ..TestOptions::default()
    });
    let mut client = app.registered_client("ada@example.com", "pw123").await;
    let user = app.store_user("ada@example.com").await;

    let (content_type, body) = file_form("cat.png", "image/png", b"image bytes");
    let response = client.post_multipart("/upload", content_type, body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"success": false}));
    assert_eq!(app.storage.received().len(), 1);
    assert!(app.uploads_for(user).await.is_empty());
    assert_eq!(app.spooled_files(), 0);
}

#[tokio::test]
async fn test_upload_over_cap() {
    let app = TestApp::with_options(TestOptions {
        max_upload_bytes: 16,
        ..TestOptions::default()
    });
    let mut client = app.registered_client("ada@example.com", "pw123").await;

    let (content_type, body) = file_form("big.jpg", "image/jpeg", &[7u8; 64]);
    let response = client.post_multipart("/upload", content_type, body).await;

    assert_eq!(response.json(), json!({"success": false}));
    assert!(app.storage.received().is_empty());
    assert_eq!(app.store.upload_count().await, 0);
    assert_eq!(app.spooled_files(), 0);
}

#[tokio::test]
async fn test_upload_exactly_at_cap() {
    let app = TestApp::with_options(TestOptions {
        max_upload_bytes: 16,
        ..TestOptions::default()
    });
    let mut client = app.registered_client("ada@example.com", "pw123").await;

    let (content_type, body) = file_form("small.jpg", "image/jpeg", &[7u8; 16]);
    let response = client.post_multipart("/upload", content_type, body).await;

    assert_eq!(response.json(), json!({"success": true}));
    assert_eq!(app.storage.received().len(), 1);
    assert_eq!(app.storage.received()[0].content_length, 16);
    assert_eq!(app.store.upload_count().await, 1);
    assert_eq!(app.spooled_files(), 0);
}

#[tokio::test]
async fn test_upload_body_not_multipart() {
    let app = TestApp::new();
    let mut client = app.registered_client("ada@example.com", "pw123").await;

    let response = client.post_json("/upload", json!({})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"success": false}));
    assert!(app.storage.received().is_empty());
    assert_eq!(app.spooled_files(), 0);
}

#[tokio::test]
async fn test_upload_without_file() {
    let app = TestApp::new();
    let mut client = app.registered_client("ada@example.com", "pw123").await;

    let (content_type, body) = text_form("caption", "no picture");
    let response = client.post_multipart("/upload", content_type, body).await;

    assert_eq!(response.json(), json!({"success": false}));
    assert!(app.storage.received().is_empty());
}

#[tokio::test]
async fn test_upload_requires_session() {
    let app = TestApp::new();
    let mut client = app.client().await;

    let (content_type, body) = file_form("cat.png", "image/png", b"image bytes");
    let response = client.post_multipart("/upload", content_type, body).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 401);
    assert!(app.storage.received().is_empty());
    assert_eq!(app.spooled_files(), 0);
}
