/**
 * Session Codec
 *
 * Sessions are stateless: the whole `SessionUser` payload travels in an
 * HS256-signed JWT stored in the `session` cookie. The server keeps no
 * session table.
 *
 * # Expiry
 *
 * `exp = iat + ttl` with zero leeway. Expiry is absolute from the moment
 * the session was issued; requests do not extend it.
 *
 * # Failure Mode
 *
 * A token that is malformed, signed with another key or expired decodes
 * to `None`. Callers treat that exactly like a missing cookie.
 */

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::middleware::cookies::SetCookie;
use crate::shared::SessionUser;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: Uuid,
    first: String,
    last: String,
    /// Issued at time (Unix timestamp)
    iat: u64,
    /// Expiration time (Unix timestamp)
    exp: u64,
}

/// Signs and verifies session tokens
#[derive(Clone)]
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    secure: bool,
}

impl SessionCodec {
    /// Build a codec from the session secret
    ///
    /// `secure` adds the `Secure` attribute to the cookie (production).
    pub fn new(secret: &str, ttl: Duration, secure: bool) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
            secure,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a session issued now
    pub fn encode(&self, user: &SessionUser) -> Result<String, jsonwebtoken::errors::Error> {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        self.encode_issued_at(user, now)
    }

    /// Sign a session issued at `iat` (Unix seconds)
    pub fn encode_issued_at(
        &self,
        user: &SessionUser,
        iat: u64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            id: user.id,
            first: user.first.clone(),
            last: user.last.clone(),
            iat,
            exp: iat + self.ttl.as_secs(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify a token and return its payload
    pub fn decode(&self, token: &str) -> Option<SessionUser> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(SessionUser {
                id: data.claims.id,
                first: data.claims.first,
                last: data.claims.last,
            }),
            Err(e) => {
                tracing::debug!("Ignoring session cookie: {}", e);
                None
            }
        }
    }

    /// The `Set-Cookie` value carrying a session token
    pub fn session_cookie(&self, token: impl Into<String>) -> SetCookie {
        SetCookie::new(SESSION_COOKIE, token)
            .max_age(self.ttl.as_secs())
            .http_only(true)
            .secure(self.secure)
    }

    /// The `Set-Cookie` value that ends a session
    pub fn clear_cookie(&self) -> SetCookie {
        SetCookie::removal(SESSION_COOKIE).secure(self.secure)
    }
}
