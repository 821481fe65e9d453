/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Page routes (`/`, `/welcome/`)
 * 2. API routes (auth, upload)
 * 3. Static files under `/static`
 * 4. Fallback handler (SPA catch-all, 404 for other methods), also used
 *    when a path exists but not for the request method, so `GET /login`
 *    gets the shell and `POST /api/logout` gets 404
 *
 * # Middleware
 *
 * Requests pass, outermost first, through request tracing, response
 * compression, session decoding and the anti-forgery check. The fallback
 * and static files are covered too.
 */

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::middleware::{csrf_middleware, session_middleware};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::pages::{catch_all, index, welcome, HOME_PATH, WELCOME_PATH};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state with configuration and collaborators
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route(HOME_PATH, get(index))
        .route(WELCOME_PATH, get(welcome));

    // Add API routes
    let router = configure_api_routes(router, app_state.config.max_upload_bytes);

    // Add static file serving
    let router = router.nest_service("/static", ServeDir::new(&app_state.config.public_dir));

    // Everything else goes to the single-page shell
    let router = router
        .fallback(catch_all)
        .method_not_allowed_fallback(catch_all);

    // Layers added later wrap the earlier ones
    router
        .layer(from_fn_with_state(app_state.clone(), csrf_middleware))
        .layer(from_fn_with_state(app_state.clone(), session_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
