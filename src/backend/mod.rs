//! Backend Module
//!
//! All server-side code: the Axum HTTP server, authentication, sessions and
//! the upload relay.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly and page handlers
//! - **`auth`** - Registration, login, logout, credential store, sessions
//! - **`upload`** - Multipart spooling and the S3 client
//! - **`middleware`** - Session decoding, access gate, anti-forgery
//! - **`error`** - Backend error type and its HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── upload/         - Upload relay
//! ├── middleware/     - Request middleware
//! ├── error/          - Error types
//! └── util.rs         - Random tokens
//! ```
//!
//! # State Management
//!
//! `AppState` holds the configuration, the session codec and the two
//! injected collaborators (`Arc<dyn CredentialStore>`,
//! `Arc<dyn ObjectStore>`). Sessions themselves are never stored on the
//! server.

/// Server initialization and state
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and sessions
pub mod auth;

/// Upload relay
pub mod upload;

/// Request middleware
pub mod middleware;

/// Backend error types
pub mod error;

/// Small shared helpers
pub mod util;

pub use error::BackendError;
pub use server::create_app;
