/**
 * Password Hashing
 *
 * bcrypt is CPU-bound, so both operations run on tokio's blocking pool
 * instead of stalling the request executor.
 */

use crate::backend::error::BackendError;

/// Hash a password with a fresh salt at the given cost
pub async fn hash_password(plain: &str, cost: u32) -> Result<String, BackendError> {
    let plain = plain.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost)).await??;
    Ok(hash)
}

/// Check a password against a stored bcrypt hash
///
/// A malformed stored hash is an error, not a mismatch.
pub async fn verify_password(plain: &str, hash: &str) -> Result<bool, BackendError> {
    let plain = plain.to_owned();
    let hash = hash.to_owned();
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash)).await??;
    Ok(valid)
}
