//! JSON envelope returned by the API routes.

use serde::{Deserialize, Serialize};

/// `{"success": bool}` body returned by register, login and upload.
///
/// Failures on these routes are never reported through the HTTP status; the
/// client only looks at `success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
}

impl ApiResponse {
    pub const fn ok() -> Self {
        Self { success: true }
    }

    pub const fn failed() -> Self {
        Self { success: false }
    }
}

impl From<bool> for ApiResponse {
    fn from(success: bool) -> Self {
        Self { success }
    }
}
