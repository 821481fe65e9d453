//! Middleware Module
//!
//! Request processing that runs before every handler.
//!
//! # Architecture
//!
//! - **`session`** - Decodes the session cookie; `AuthUser` access gate
//! - **`csrf`** - Anti-forgery token issuance and verification
//! - **`cookies`** - Cookie parsing and `Set-Cookie` rendering
//!
//! # Order
//!
//! The router wraps handlers as compression → session → csrf → handler.

pub mod cookies;
pub mod csrf;
pub mod session;

pub use csrf::csrf_middleware;
pub use session::{session_middleware, AuthUser, CurrentSession};
