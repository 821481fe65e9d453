/**
 * Server Initialization
 *
 * This module builds the application from a loaded configuration.
 *
 * # Initialization Process
 *
 * 1. Create the upload directory
 * 2. Pick the credential store (PostgreSQL if reachable, else in-memory)
 * 3. Build the S3 client
 * 4. Assemble `AppState` and the router
 *
 * Tests skip this function and call `AppState::new` + `create_router`
 * with their own collaborators.
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::store::{CredentialStore, MemoryCredentialStore, PgCredentialStore};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::upload::storage::S3Client;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the upload directory cannot be created or the HTTP client for
/// storage cannot be built. A missing database is not an error.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, Box<dyn std::error::Error>> {
    tracing::info!("Initializing wall backend server");
    tracing::debug!("Configuration: {:?}", config);

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tracing::info!("Spooling uploads in {}", config.upload_dir.display());

    let credentials: Arc<dyn CredentialStore> = match load_database(&config).await {
        Some(pool) => Arc::new(PgCredentialStore::new(pool)),
        None => {
            tracing::warn!("Using in-memory credential store; users are lost on restart");
            Arc::new(MemoryCredentialStore::new())
        }
    };

    let storage = Arc::new(S3Client::new(config.s3.clone())?);
    tracing::info!("Uploads go to bucket {} in {}", config.s3.bucket, config.s3.region);

    let app_state = AppState::new(config, credentials, storage);
    let app = create_router(app_state);

    tracing::info!("Router configured");

    Ok(app)
}
