//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and the shared session response
//! ├── types.rs    - Request types
//! ├── register.rs - POST /register
//! ├── login.rs    - POST /login
//! └── logout.rs   - GET /api/logout
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: names, email and password → user created → session cookie
//! 2. **Login**: email and password → credentials verified → session cookie
//! 3. **Logout**: session cookie cleared → redirect to `/welcome/`
//!
//! Register and login always answer `200 {success}`; the cookie is only set
//! when `success` is true.

use axum::{
    http::HeaderMap,
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::sessions::SessionCodec;
use crate::shared::{ApiResponse, SessionUser};

/// Request types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

pub use types::{LoginRequest, RegisterRequest};

pub use login::login;
pub use logout::logout;
pub use register::register;

/// `{success: true}` with a fresh session cookie for `user`
///
/// Falls back to `{success: false}` if the token cannot be signed.
pub(crate) fn signed_in(sessions: &SessionCodec, user: &SessionUser) -> Response {
    match sessions.encode(user) {
        Ok(token) => {
            let mut headers = HeaderMap::new();
            sessions.session_cookie(token).append_to(&mut headers);
            (headers, Json(ApiResponse::ok())).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to sign session for {}: {:?}", user.id, e);
            Json(ApiResponse::failed()).into_response()
        }
    }
}
