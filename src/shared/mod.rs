//! Shared Types
//!
//! Types that are serialized to or from the browser client. They carry no
//! server-only dependencies so the module builds without the `ssr` feature.

pub mod response;
pub mod session;

pub use response::ApiResponse;
pub use session::SessionUser;
