/**
 * Upload Handler
 *
 * POST /upload - relays one multipart file to object storage on behalf of
 * the logged-in user.
 *
 * # Relay Process
 *
 * 1. Spool the first file part to the upload directory
 * 2. PUT it to the bucket under the spooled name
 * 3. On 200, record the object key against the session user
 *
 * The spooled file is removed when the request finishes, whatever the
 * outcome.
 */

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::upload::spool::spool_first_file;
use crate::backend::upload::storage::PutObject;
use crate::shared::{ApiResponse, SessionUser};

/// Move one uploaded file to storage and record it
///
/// # Returns
///
/// * `Ok(true)` - stored and recorded
/// * `Ok(false)` - storage answered with a status other than 200
/// * `Err(_)` - spooling, transport or store failure
pub async fn relay_upload(
    state: &AppState,
    user: &SessionUser,
    multipart: Multipart,
) -> Result<bool, BackendError> {
    let upload = spool_first_file(&state.config.upload_dir, multipart, state.config.max_upload_bytes).await?;

    let status = state
        .storage
        .put_object(PutObject {
            key: &upload.key,
            path: upload.file.path(),
            content_type: &upload.content_type,
            content_length: upload.size,
        })
        .await?;

    if status != 200 {
        tracing::warn!("Upload {} for user {} failed with status {}", upload.key, user.id, status);
        return Ok(false);
    }

    state.credentials.record_upload(user.id, &upload.key).await?;
    tracing::info!("Stored upload {} for user {}", upload.key, user.id);

    Ok(true)
}

/// Upload handler
///
/// Anonymous callers never get here: `AuthUser` rejects them with 401.
/// Every failure past the access gate is reported as `{success: false}`,
/// including a body that is not multipart at all.
pub async fn upload_image(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<ApiResponse> {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::warn!("Upload for user {} is not multipart: {}", user.id, rejection.body_text());
            return Json(ApiResponse::failed());
        }
    };

    match relay_upload(&state, &user, multipart).await {
        Ok(stored) => Json(ApiResponse::from(stored)),
        Err(e) => {
            if e.status_code().is_server_error() || matches!(e, BackendError::Storage(_)) {
                tracing::error!("Upload for user {} failed: {}", user.id, e);
            } else {
                tracing::warn!("Upload for user {} rejected: {}", user.id, e);
            }
            Json(ApiResponse::failed())
        }
    }
}
