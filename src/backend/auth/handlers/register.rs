/**
 * Registration Handler
 *
 * POST /register
 *
 * # Registration Process
 *
 * 1. Hash the password with bcrypt
 * 2. Insert the user (email must be unique)
 * 3. Start a session for the new user
 *
 * Every failure (duplicate email, hashing error, store unavailable,
 * malformed body) answers `{success: false}` and leaves no user behind.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::handlers::signed_in;
use crate::backend::auth::handlers::types::RegisterRequest;
use crate::backend::auth::password::hash_password;
use crate::backend::auth::store::StoreError;
use crate::backend::auth::users::NewUser;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, SessionUser};

/// Hash the password and insert the user
///
/// # Returns
/// The session payload of the new user
pub async fn register_user(state: &AppState, request: RegisterRequest) -> Result<SessionUser, BackendError> {
    let password_hash = hash_password(&request.password, state.config.bcrypt_cost).await?;

    let user = state
        .credentials
        .create_user(NewUser {
            first: request.first,
            last: request.last,
            email: request.email,
            password_hash,
        })
        .await?;

    tracing::info!("User registered: {}", user.id);

    Ok(user.session_user())
}

/// Registration handler
pub async fn register(
    State(state): State<AppState>,
    request: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            tracing::warn!("Malformed registration request: {}", rejection);
            return Json(ApiResponse::failed()).into_response();
        }
    };
    let email = request.email.clone();

    match register_user(&state, request).await {
        Ok(user) => signed_in(&state.sessions, &user),
        Err(BackendError::Store(StoreError::DuplicateEmail)) => {
            tracing::warn!("Registration refused for {}: email already registered", email);
            Json(ApiResponse::failed()).into_response()
        }
        Err(e) => {
            tracing::error!("Registration failed for {}: {}", email, e);
            Json(ApiResponse::failed()).into_response()
        }
    }
}
