/**
 * Credential Store
 *
 * The system of record for users and upload records, behind a trait so the
 * handlers can run against PostgreSQL in production and an in-memory store
 * in tests or when no database is configured.
 *
 * # Implementations
 *
 * - `PgCredentialStore` - sqlx queries from `users.rs`
 * - `MemoryCredentialStore` - `RwLock`-guarded maps, lost on restart
 *
 * Both enforce the same constraints: emails are unique and an upload can
 * only be recorded for an existing user.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::{self, NewUser, UploadRecord, User};

/// Unique constraint on `users.email`
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Credential store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with this email already exists
    #[error("Email already registered")]
    DuplicateEmail,

    /// The referenced user does not exist
    #[error("User not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db)
                if db.is_unique_violation() && db.constraint() == Some(USERS_EMAIL_KEY) =>
            {
                Self::DuplicateEmail
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => Self::NotFound,
            _ => Self::Database(err),
        }
    }
}

/// Persistence for users and upload records
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user; fails with `DuplicateEmail` if the email is taken
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Look up a user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Record an object key against a user
    async fn record_upload(&self, user_id: Uuid, object_key: &str) -> Result<UploadRecord, StoreError>;

    /// Upload records for a user, oldest first
    async fn uploads_for(&self, user_id: Uuid) -> Result<Vec<UploadRecord>, StoreError>;
}

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        Ok(users::create_user(&self.pool, new_user).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(users::get_user_by_email(&self.pool, email).await?)
    }

    async fn record_upload(&self, user_id: Uuid, object_key: &str) -> Result<UploadRecord, StoreError> {
        Ok(users::insert_upload(&self.pool, user_id, object_key).await?)
    }

    async fn uploads_for(&self, user_id: Uuid) -> Result<Vec<UploadRecord>, StoreError> {
        Ok(users::get_uploads_for_user(&self.pool, user_id).await?)
    }
}

#[derive(Debug, Default)]
struct MemoryTables {
    users: HashMap<Uuid, User>,
    uploads: Vec<UploadRecord>,
}

/// In-memory store, used when `DATABASE_URL` is unset and in tests
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tables: RwLock<MemoryTables>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Number of upload records across all users
    pub async fn upload_count(&self) -> usize {
        self.tables.read().await.uploads.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            first: new_user.first,
            last: new_user.last,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn record_upload(&self, user_id: Uuid, object_key: &str) -> Result<UploadRecord, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::NotFound);
        }

        let record = UploadRecord {
            id: Uuid::new_v4(),
            user_id,
            object_key: object_key.to_string(),
            created_at: Utc::now(),
        };
        tables.uploads.push(record.clone());

        Ok(record)
    }

    async fn uploads_for(&self, user_id: Uuid) -> Result<Vec<UploadRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .uploads
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}
