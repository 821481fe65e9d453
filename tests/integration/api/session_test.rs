//! Session and page routing integration tests
//!
//! The login wall: which pages redirect where, and which cookies count as
//! a session.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::{Method, StatusCode};
use uuid::Uuid;
use wall::backend::server::config::DEFAULT_SESSION_TTL;
use wall::shared::SessionUser;

use crate::common::{TestApp, SHELL_HTML, STYLE_CSS};

fn now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
}

#[tokio::test]
async fn test_anonymous_pages() {
    let app = TestApp::new();
    let mut client = app.client().await;

    let response = client.get("/").await;
    assert!(response.status.is_redirection());
    assert_eq!(response.location(), Some("/welcome/"));

    let response = client.get("/welcome/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), SHELL_HTML);

    let response = client.get("/profile/42").await;
    assert_eq!(response.location(), Some("/welcome/"));
}

#[tokio::test]
async fn test_authenticated_pages() {
    let app = TestApp::new();
    let mut client = app.registered_client("ada@example.com", "pw123").await;

    let response = client.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), SHELL_HTML);

    let response = client.get("/welcome/").await;
    assert!(response.status.is_redirection());
    assert_eq!(response.location(), Some("/"));

    let response = client.get("/profile/42").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), SHELL_HTML);
}

#[tokio::test]
async fn test_get_on_post_only_paths_is_routed_like_home() {
    let app = TestApp::new();
    let mut anonymous = app.client().await;
    let mut member = app.registered_client("ada@example.com", "pw123").await;

    for path in ["/login", "/register", "/upload"] {
        let response = anonymous.get(path).await;
        assert!(response.status.is_redirection(), "anonymous GET {}", path);
        assert_eq!(response.location(), Some("/welcome/"), "anonymous GET {}", path);

        let response = member.get(path).await;
        assert_eq!(response.status, StatusCode::OK, "member GET {}", path);
        assert_eq!(response.text(), SHELL_HTML, "member GET {}", path);
    }
}

#[tokio::test]
async fn test_expired_session_is_anonymous() {
    let app = TestApp::new();
    let mut client = app.client().await;

    let user = SessionUser::new(Uuid::new_v4(), "Ada", "Lovelace");
    let issued = now() - DEFAULT_SESSION_TTL.as_secs() - 60;
    let token = app.sessions.encode_issued_at(&user, issued).unwrap();
    client.set_cookie("session", &token);

    let response = client.get("/").await;
    assert_eq!(response.location(), Some("/welcome/"));
}

#[tokio::test]
async fn test_session_close_to_expiry_still_valid() {
    let app = TestApp::new();
    let mut client = app.client().await;

    let user = SessionUser::new(Uuid::new_v4(), "Ada", "Lovelace");
    let issued = now() - DEFAULT_SESSION_TTL.as_secs() + 3600;
    let token = app.sessions.encode_issued_at(&user, issued).unwrap();
    client.set_cookie("session", &token);

    let response = client.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_tampered_session_is_anonymous() {
    let app = TestApp::new();
    let mut client = app.registered_client("ada@example.com", "pw123").await;

    let token = client.cookie("session").unwrap().to_string();
    let (rest, _signature) = token.rsplit_once('.').unwrap();
    client.set_cookie("session", &format!("{}.forged", rest));

    let response = client.get("/").await;
    assert_eq!(response.location(), Some("/welcome/"));
}

#[tokio::test]
async fn test_static_assets() {
    let app = TestApp::new();
    let mut client = app.client().await;

    let response = client.get("/static/style.css").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), STYLE_CSS);
}

#[tokio::test]
async fn test_unmatched_non_get_is_not_found() {
    let app = TestApp::new();
    let mut client = app.registered_client("ada@example.com", "pw123").await;

    let request = client.request(Method::POST, "/nowhere").body(Body::empty()).unwrap();
    let response = client.send_raw(request).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_get_on_get_only_path_is_not_found() {
    let app = TestApp::new();
    let mut client = app.registered_client("ada@example.com", "pw123").await;

    let request = client.request(Method::POST, "/api/logout").body(Body::empty()).unwrap();
    let response = client.send_raw(request).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(client.cookie("session").is_some());

    let request = client.request(Method::DELETE, "/welcome/").body(Body::empty()).unwrap();
    let response = client.send_raw(request).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shell_is_compressed_on_request() {
    let app = TestApp::new();
    let mut client = app.registered_client("ada@example.com", "pw123").await;

    let request = client
        .request(Method::GET, "/")
        .header("accept-encoding", "gzip")
        .body(Body::empty())
        .unwrap();
    let response = client.send_raw(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers.get("content-encoding").unwrap(), "gzip");
}
