//! Authentication Module
//!
//! User registration, login and stateless sessions.
//!
//! # Architecture
//!
//! - **`users`** - User and upload rows, PostgreSQL queries
//! - **`store`** - `CredentialStore` trait (PostgreSQL and in-memory)
//! - **`password`** - bcrypt on the blocking pool
//! - **`sessions`** - Signed session cookie codec
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── store.rs        - Credential store trait and implementations
//! ├── password.rs     - Password hashing
//! ├── sessions.rs     - Session cookie codec
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - The session cookie carries `{id, first, last}` only
//! - Sessions expire 14 days after login, regardless of activity

/// User data model and database operations
pub mod users;

/// Credential store
pub mod store;

/// Password hashing
pub mod password;

/// Session cookie codec
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{login, logout, register, LoginRequest, RegisterRequest};
pub use sessions::SessionCodec;
pub use store::{CredentialStore, MemoryCredentialStore, PgCredentialStore, StoreError};
