/**
 * API Route Handlers
 *
 * Registers the JSON and upload endpoints.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /register` - User registration
 * - `POST /login` - User login
 * - `GET /api/logout` - End the session
 *
 * ## Uploads
 * - `POST /upload` - Relay a file to object storage (requires a session)
 */

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{login, logout, register};
use crate::backend::server::state::AppState;
use crate::backend::upload::upload_image;

/// Room for multipart boundaries and part headers on top of the file cap
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `max_upload_bytes` - File size cap; the upload route's body limit is
///   raised to fit it
pub fn configure_api_routes(router: Router<AppState>, max_upload_bytes: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    router
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/api/logout", get(logout))
        .route(
            "/upload",
            post(upload_image).layer(DefaultBodyLimit::max(body_limit)),
        )
}
