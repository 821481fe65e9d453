//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation and middleware stack
//! - **`pages`** - Application shell and the login-wall redirects
//! - **`api_routes`** - JSON and upload endpoints
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── pages.rs        - Page handlers
//! └── api_routes.rs   - API endpoint registration
//! ```
//!
//! # Routes
//!
//! | Method & Path     | Session  | Response                          |
//! |-------------------|----------|-----------------------------------|
//! | `GET /`           | optional | shell, or redirect to `/welcome/` |
//! | `GET /welcome/`   | optional | shell, or redirect to `/`         |
//! | `POST /register`  | no       | `{success}`                       |
//! | `POST /login`     | no       | `{success}`                       |
//! | `GET /api/logout` | no       | redirect to `/welcome/`           |
//! | `POST /upload`    | required | `{success}`                       |
//! | `GET /static/*`   | no       | static asset                      |
//! | `GET *`           | optional | same as `GET /`                   |

/// Main router creation
pub mod router;

/// Page handlers
pub mod pages;

/// API endpoint registration
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
