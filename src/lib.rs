//! Wall - Main Library
//!
//! Wall is the backend of a small social-wall application. It serves the
//! single-page client, registers and logs in users with email and password,
//! keeps sessions in signed cookies and relays image uploads to an S3 bucket.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that cross the wire to the browser client
//!   - Session payload, JSON response envelope
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum router, access gate and page handlers
//!   - Registration, login and logout
//!   - Signed-cookie sessions and anti-forgery tokens
//!   - Upload relay to object storage
//!   - Credential store (PostgreSQL or in-memory)
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Server build. Pulls in axum, sqlx, bcrypt,
//!   jsonwebtoken and the storage client.
//!
//! # Usage
//!
//! ```rust,no_run
//! use wall::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Sessions
//!
//! Sessions are stateless on the server: the whole payload (`{id, first,
//! last}`) travels in an HS256-signed cookie with an absolute 14-day expiry.
//! A cookie that fails verification is treated as "no session".

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
