/**
 * Cookie Helpers
 *
 * Minimal `Cookie` request-header parsing and `Set-Cookie` rendering for
 * the session and anti-forgery cookies.
 */

use std::fmt;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};

/// Find a cookie value by name in the request headers
///
/// Multiple `Cookie` headers are searched in order; the first match wins.
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// A `Set-Cookie` header value
#[derive(Debug, Clone)]
pub struct SetCookie {
    name: &'static str,
    value: String,
    max_age: Option<u64>,
    http_only: bool,
    secure: bool,
}

impl SetCookie {
    /// A cookie scoped to `/` with `SameSite=Lax`
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
            max_age: None,
            http_only: false,
            secure: false,
        }
    }

    /// A cookie that tells the browser to drop `name` immediately
    pub fn removal(name: &'static str) -> Self {
        Self::new(name, "").max_age(0).http_only(true)
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Append this cookie to a response's headers
    ///
    /// Values are generated server-side from base64url and `.` characters,
    /// so a rejected value only happens with a broken caller; it is logged
    /// and skipped.
    pub fn append_to(&self, headers: &mut HeaderMap) {
        match HeaderValue::try_from(self.to_string()) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Refusing to set cookie {}: {}", self.name, e),
        }
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}; Path=/; SameSite=Lax", self.name, self.value)?;
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={}", max_age)?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        Ok(())
    }
}
