/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse`, so the access gate and the
 * anti-forgery middleware can return them directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "error": "Not logged in",
 *   "status": 401
 * }
 * ```
 *
 * The `success` field keeps the body readable by the same client code that
 * handles the regular API envelope.
 */

use axum::response::{IntoResponse, Json, Response};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = serde_json::json!({
            "success": false,
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
