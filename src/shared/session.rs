//! Session payload carried inside the signed session cookie.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The logged-in user as seen by the client.
///
/// This is the only user data that ever leaves the server: it never holds
/// the email address or the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID
    pub id: Uuid,
    /// First name
    pub first: String,
    /// Last name
    pub last: String,
}

impl SessionUser {
    pub fn new(id: Uuid, first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            id,
            first: first.into(),
            last: last.into(),
        }
    }
}
