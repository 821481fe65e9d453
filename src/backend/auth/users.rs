/**
 * User Model and Database Operations
 *
 * This module handles user and upload rows and their PostgreSQL queries.
 * Handlers never call these directly; they go through the
 * `CredentialStore` trait (see `store.rs`).
 */

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::SessionUser;

/// User struct representing a user in the database
///
/// Not `Serialize`: the password hash must never reach a response.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// First name
    pub first: String,
    /// Last name
    pub last: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The session payload for this user
    pub fn session_user(&self) -> SessionUser {
        SessionUser::new(self.id, self.first.clone(), self.last.clone())
    }
}

/// A user row about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first: String,
    pub last: String,
    pub email: String,
    pub password_hash: String,
}

/// An object key recorded against the user who uploaded it
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UploadRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub object_key: String,
    pub created_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `new_user` - Names, email and password hash
///
/// # Returns
/// Created user or error. A duplicate email fails on the `users_email_key`
/// unique constraint.
pub async fn create_user(pool: &PgPool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, first, last, email, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, first, last, email, password_hash, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new_user.first)
    .bind(&new_user.last)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, first, last, email, password_hash, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Record an uploaded object key for a user
pub async fn insert_upload(
    pool: &PgPool,
    user_id: Uuid,
    object_key: &str,
) -> Result<UploadRecord, sqlx::Error> {
    let record = sqlx::query_as::<_, UploadRecord>(
        r#"
        INSERT INTO uploads (id, user_id, object_key, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, object_key, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(object_key)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Get every upload recorded for a user, oldest first
pub async fn get_uploads_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<UploadRecord>, sqlx::Error> {
    sqlx::query_as::<_, UploadRecord>(
        r#"
        SELECT id, user_id, object_key, created_at
        FROM uploads
        WHERE user_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
