//! Anti-forgery integration tests
//!
//! State-changing requests need the token from the `wall_-t` cookie.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;

use crate::common::{TestApp, TestClient};

fn login_request(client: &TestClient, header: Option<(&str, &str)>) -> Request<Body> {
    // Built without the client's automatic token header.
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(CONTENT_TYPE, "application/json");
    if let Some(secret) = client.cookie("_csrf") {
        builder = builder.header("cookie", format!("_csrf={}", secret));
    }
    if let Some((name, value)) = header {
        builder = builder.header(name, value);
    }
    builder
        .body(Body::from(json!({"email": "ada@example.com", "password": "pw123"}).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_every_response_issues_token() {
    let app = TestApp::new();
    let mut client = TestClient::new(app.router.clone());

    let first = client.get("/welcome/").await;
    let cookies = first.set_cookies();
    assert!(cookies.iter().any(|c| c.starts_with("_csrf=") && c.contains("HttpOnly")));
    assert!(cookies.iter().any(|c| c.starts_with("wall_-t=") && !c.contains("HttpOnly")));
    let first_token = client.csrf_token().unwrap().to_string();

    let second = client.get("/welcome/").await;
    let cookies = second.set_cookies();
    assert!(!cookies.iter().any(|c| c.starts_with("_csrf=")));
    assert!(cookies.iter().any(|c| c.starts_with("wall_-t=")));
    assert_ne!(client.csrf_token().unwrap(), first_token);
}

#[tokio::test]
async fn test_post_without_token_is_rejected() {
    let app = TestApp::new();
    app.registered_client("ada@example.com", "pw123").await;
    let mut client = app.client().await;

    let request = login_request(&client, None);
    let response = client.send_raw(request).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.json()["status"], 403);
    assert!(client.cookie("session").is_none());
}

#[tokio::test]
async fn test_post_without_secret_is_rejected() {
    let app = TestApp::new();
    app.registered_client("ada@example.com", "pw123").await;
    let mut fresh = TestClient::new(app.router.clone());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/register")
        .header(CONTENT_TYPE, "application/json")
        .header("x-csrf-token", "made.up")
        .body(Body::from(
            json!({"first": "A", "last": "B", "email": "b@example.com", "password": "x"}).to_string(),
        ))
        .unwrap();
    let response = fresh.send_raw(request).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.user_count().await, 1);
}

#[tokio::test]
async fn test_token_from_other_client_is_rejected() {
    let app = TestApp::new();
    app.registered_client("ada@example.com", "pw123").await;
    let mut victim = app.client().await;
    let attacker = app.client().await;

    let stolen = attacker.csrf_token().unwrap().to_string();
    let request = login_request(&victim, Some(("x-csrf-token", stolen.as_str())));
    let response = victim.send_raw(request).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_alternative_token_headers() {
    let app = TestApp::new();
    app.registered_client("ada@example.com", "pw123").await;

    for header in ["x-csrf-token", "x-xsrf-token", "csrf-token"] {
        let mut client = app.client().await;
        let token = client.csrf_token().unwrap().to_string();

        let request = login_request(&client, Some((header, token.as_str())));
        let response = client.send_raw(request).await;

        assert_eq!(response.status, StatusCode::OK, "header {}", header);
        assert_eq!(response.json(), json!({"success": true}));
    }
}
