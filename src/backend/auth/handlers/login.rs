/**
 * Login Handler
 *
 * POST /login
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Start a session
 *
 * # Security
 *
 * - Unknown email and wrong password answer the same `{success: false}`
 * - Verification is never attempted without a stored hash
 * - A failed login leaves any existing session cookie untouched
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::handlers::signed_in;
use crate::backend::auth::handlers::types::LoginRequest;
use crate::backend::auth::password::verify_password;
use crate::backend::auth::store::CredentialStore;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, SessionUser};

/// Check an email/password pair against the store
///
/// # Returns
/// * `Ok(Some(user))` - credentials match
/// * `Ok(None)` - unknown email or wrong password
/// * `Err(_)` - store failure or malformed stored hash
pub async fn authenticate(
    store: &dyn CredentialStore,
    email: &str,
    password: &str,
) -> Result<Option<SessionUser>, BackendError> {
    let Some(user) = store.find_by_email(email).await? else {
        tracing::warn!("Login for unknown email: {}", email);
        return Ok(None);
    };

    if verify_password(password, &user.password_hash).await? {
        Ok(Some(user.session_user()))
    } else {
        tracing::warn!("Invalid password for user: {}", user.id);
        Ok(None)
    }
}

/// Login handler
pub async fn login(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            tracing::warn!("Malformed login request: {}", rejection);
            return Json(ApiResponse::failed()).into_response();
        }
    };

    match authenticate(state.credentials.as_ref(), &request.email, &request.password).await {
        Ok(Some(user)) => {
            tracing::info!("User logged in: {}", user.id);
            signed_in(&state.sessions, &user)
        }
        Ok(None) => Json(ApiResponse::failed()).into_response(),
        Err(e) => {
            tracing::error!("Login failed for {}: {}", request.email, e);
            Json(ApiResponse::failed()).into_response()
        }
    }
}
