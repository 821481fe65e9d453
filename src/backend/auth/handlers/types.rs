/**
 * Authentication Handler Types
 *
 * Request bodies for the registration and login handlers. Both answer with
 * the shared `ApiResponse` envelope.
 */

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    pub first: String,
    pub last: String,
    /// Must not belong to an existing user
    pub email: String,
    /// Plaintext; hashed before storage and never logged
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
