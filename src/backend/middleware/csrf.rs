/**
 * Anti-forgery Middleware
 *
 * Double-submit tokens bound to a per-client secret.
 *
 * # Cookies
 *
 * - `_csrf` - random secret, HttpOnly, issued once per client
 * - `wall_-t` - readable token, reissued on every response
 *
 * A token is `<salt>.<base64url(HMAC-SHA256(secret, salt))>`. The client
 * script copies `wall_-t` into a request header; a cross-site form can
 * neither read the cookie nor set the header.
 *
 * # Checked Methods
 *
 * POST, PUT, PATCH and DELETE must carry a valid token in `x-csrf-token`,
 * `x-xsrf-token` or `csrf-token`. Anything else is rejected with 403
 * before the handler runs.
 */

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::backend::error::BackendError;
use crate::backend::middleware::cookies::{parse_cookie, SetCookie};
use crate::backend::server::state::AppState;
use crate::backend::util::random_urlsafe;

type HmacSha256 = Hmac<Sha256>;

/// HttpOnly cookie holding the per-client secret
pub const CSRF_SECRET_COOKIE: &str = "_csrf";
/// Readable cookie holding the current token
pub const CSRF_TOKEN_COOKIE: &str = "wall_-t";
/// Request headers accepted as the token carrier, in lookup order
pub const CSRF_HEADERS: [&str; 3] = ["x-csrf-token", "x-xsrf-token", "csrf-token"];

const SECRET_BYTES: usize = 18;
const SALT_BYTES: usize = 8;

fn sign(secret: &str, salt: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(salt.as_bytes());
    Some(mac)
}

/// Mint a fresh token for a secret
pub fn issue_token(secret: &str) -> Option<String> {
    let salt = random_urlsafe(SALT_BYTES);
    let mac = sign(secret, &salt)?;
    Some(format!("{}.{}", salt, URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())))
}

/// Check a token against a secret in constant time
pub fn verify_token(secret: &str, token: &str) -> bool {
    let Some((salt, signature)) = token.split_once('.') else {
        return false;
    };
    let Ok(expected) = URL_SAFE_NO_PAD.decode(signature) else {
        return false;
    };
    let Some(mac) = sign(secret, salt) else {
        return false;
    };
    mac.verify_slice(&expected).is_ok()
}

fn requires_token(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    CSRF_HEADERS
        .iter()
        .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
}

/// Anti-forgery middleware
///
/// Rejects unsafe methods without a valid token and attaches the anti-forgery
/// cookies to every response, rejections included.
pub async fn csrf_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let existing = parse_cookie(request.headers(), CSRF_SECRET_COOKIE);
    let secret = existing.clone().unwrap_or_else(|| random_urlsafe(SECRET_BYTES));

    let mut response = if requires_token(request.method()) {
        let valid = match (&existing, token_from_headers(request.headers())) {
            (Some(secret), Some(token)) => verify_token(secret, token),
            _ => false,
        };

        if valid {
            next.run(request).await
        } else {
            tracing::warn!("Rejected {} {}: invalid anti-forgery token", request.method(), request.uri().path());
            BackendError::Forbidden.into_response()
        }
    } else {
        next.run(request).await
    };

    let secure = state.config.production;
    let headers = response.headers_mut();

    if existing.is_none() {
        SetCookie::new(CSRF_SECRET_COOKIE, secret.as_str())
            .http_only(true)
            .secure(secure)
            .append_to(headers);
    }
    if let Some(token) = issue_token(&secret) {
        SetCookie::new(CSRF_TOKEN_COOKIE, token).secure(secure).append_to(headers);
    }

    response
}
