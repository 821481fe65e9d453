/**
 * Backend Error Types
 *
 * This module defines the error type used by every fallible step of the
 * request handlers. Handlers compose the steps with `?` and decide at the
 * edge whether the failure becomes `{success: false}` or an HTTP error.
 *
 * # Error Categories
 *
 * - Access errors (`Unauthorized`, `Forbidden`) raised by the access gate
 *   and the anti-forgery check
 * - Upload errors (`UploadTooLarge`, `Multipart`, `Io`)
 * - Collaborator errors (`Store`, `Storage`, `Password`, `Task`)
 * - Generic handler errors with an explicit status code
 */

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::store::StoreError;
use crate::backend::upload::storage::StorageError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (e.g. missing file part)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// The route requires a session and the request has none
    #[error("Not logged in")]
    Unauthorized,

    /// State-changing request without a valid anti-forgery token
    #[error("Invalid anti-forgery token")]
    Forbidden,

    /// Uploaded file is bigger than the configured cap
    #[error("Upload exceeds the {limit} byte limit")]
    UploadTooLarge { limit: u64 },

    /// Credential store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Object storage failure (transport, not a non-200 answer)
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// bcrypt failure, including a malformed stored hash
    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    /// Malformed or oversized multipart body
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// Local disk failure while spooling an upload or reading the shell
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking task (password hashing) panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Unauthorized` - 401
    /// - `Forbidden` - 403
    /// - `UploadTooLarge` - 413
    /// - `Store` - 409 for a duplicate email, 500 otherwise
    /// - `Storage` - 502
    /// - `Multipart` - whatever axum reports for the body
    /// - everything else - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UploadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Store(StoreError::DuplicateEmail) => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(_) => StatusCode::BAD_GATEWAY,
            Self::Multipart(err) => err.status(),
            Self::Password(_) | Self::Io(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}
