/**
 * Session Middleware and Access Gate
 *
 * `session_middleware` decodes the `session` cookie once per request and
 * stores the result in the request extensions. Handlers read it back with
 * one of two extractors:
 *
 * - `CurrentSession` - optional session (pages, which redirect on their own)
 * - `AuthUser` - required session; rejects with 401 otherwise
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::{SessionCodec, SESSION_COOKIE};
use crate::backend::error::BackendError;
use crate::backend::middleware::cookies::parse_cookie;
use crate::shared::SessionUser;

/// The decoded session of the current request, if any
#[derive(Clone, Debug, Default)]
pub struct CurrentSession(pub Option<SessionUser>);

impl CurrentSession {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

/// Session middleware
///
/// A missing, tampered or expired cookie yields an anonymous request.
pub async fn session_middleware(
    State(codec): State<SessionCodec>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = parse_cookie(request.headers(), SESSION_COOKIE)
        .filter(|token| !token.is_empty())
        .and_then(|token| codec.decode(&token));

    request.extensions_mut().insert(CurrentSession(session));

    next.run(request).await
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<CurrentSession>().cloned().unwrap_or_default())
    }
}

/// Axum extractor for routes that require a session
#[derive(Clone, Debug)]
pub struct AuthUser(pub SessionUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .and_then(|session| session.0.clone())
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("Rejected {}: not logged in", parts.uri.path());
                BackendError::Unauthorized
            })
    }
}
