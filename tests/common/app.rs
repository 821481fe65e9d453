//! Application fixture
//!
//! Builds the full router around a temp directory, an in-memory credential
//! store and a fake object store.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;
use uuid::Uuid;
use wall::backend::auth::{CredentialStore, MemoryCredentialStore, SessionCodec};
use wall::backend::routes::create_router;
use wall::backend::server::config::DEFAULT_MAX_UPLOAD_BYTES;
use wall::backend::server::{AppState, ServerConfig};

use super::client::TestClient;
use super::mock_storage::FakeObjectStore;

pub const TEST_SESSION_SECRET: &str = "integration-test-secret";
pub const SHELL_HTML: &str =
    "<!doctype html><html><head><title>Wall</title></head><body><div id=\"main\"></div></body></html>";
pub const STYLE_CSS: &str = "body { margin: 0; }";

/// Knobs for a test app
#[derive(Debug, Clone)]
pub struct TestOptions {
    pub storage_status: u16,
    pub max_upload_bytes: u64,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            storage_status: 200,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryCredentialStore>,
    pub storage: Arc<FakeObjectStore>,
    pub sessions: SessionCodec,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_options(TestOptions::default())
    }

    pub fn with_options(options: TestOptions) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");
        let public_dir = dir.path().join("public");
        let index_html = dir.path().join("index.html");

        std::fs::create_dir_all(&upload_dir).unwrap();
        std::fs::create_dir_all(&public_dir).unwrap();
        std::fs::write(&index_html, SHELL_HTML).unwrap();
        std::fs::write(public_dir.join("style.css"), STYLE_CSS).unwrap();

        let config = ServerConfig::builder()
            .session_secret(TEST_SESSION_SECRET)
            .bcrypt_cost(4)
            .upload_dir(&upload_dir)
            .public_dir(&public_dir)
            .index_html(&index_html)
            .max_upload_bytes(options.max_upload_bytes)
            .build()
            .unwrap();

        let store = Arc::new(MemoryCredentialStore::new());
        let storage = Arc::new(FakeObjectStore::answering(options.storage_status));

        let state = AppState::new(config, store.clone(), storage.clone());
        let sessions = state.sessions.clone();

        Self {
            router: create_router(state),
            store,
            storage,
            sessions,
            upload_dir,
            _dir: dir,
        }
    }

    /// A client that has already fetched one page and holds anti-forgery cookies
    pub async fn client(&self) -> TestClient {
        let mut client = TestClient::new(self.router.clone());
        client.get("/welcome/").await;
        client
    }

    /// A client logged in as a freshly registered user
    pub async fn registered_client(&self, email: &str, password: &str) -> TestClient {
        let mut client = self.client().await;
        let response = client
            .post_json(
                "/register",
                serde_json::json!({
                    "first": "Ada",
                    "last": "Lovelace",
                    "email": email,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(response.json()["success"], true);
        client
    }

    /// ID of a registered user
    pub async fn store_user(&self, email: &str) -> Uuid {
        self.store.find_by_email(email).await.unwrap().unwrap().id
    }

    /// Object keys recorded for a user, oldest first
    pub async fn uploads_for(&self, user_id: Uuid) -> Vec<String> {
        self.store
            .uploads_for(user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|record| record.object_key)
            .collect()
    }

    /// Files left in the upload directory
    pub fn spooled_files(&self) -> usize {
        std::fs::read_dir(&self.upload_dir).unwrap().count()
    }
}
