/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The loaded configuration
 * - The session codec
 * - The credential store (PostgreSQL or in-memory)
 * - The object store (S3 or a test double)
 *
 * Collaborators are trait objects built once in `create_app`; nothing is
 * reached through globals.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use wall::backend::server::state::AppState;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let limit = state.config.max_upload_bytes;
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::sessions::SessionCodec;
use crate::backend::auth::store::CredentialStore;
use crate::backend::server::config::ServerConfig;
use crate::backend::upload::storage::ObjectStore;

/// Application state shared by every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub sessions: SessionCodec,
    pub credentials: Arc<dyn CredentialStore>,
    pub storage: Arc<dyn ObjectStore>,
}

impl AppState {
    /// Assemble the state; the session codec is derived from `config`
    pub fn new(
        config: ServerConfig,
        credentials: Arc<dyn CredentialStore>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        let sessions = SessionCodec::new(&config.session_secret, config.session_ttl, config.production);

        Self {
            config: Arc::new(config),
            sessions,
            credentials,
            storage,
        }
    }
}

impl FromRef<AppState> for SessionCodec {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
