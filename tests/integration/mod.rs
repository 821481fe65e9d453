//! Integration tests
//!
//! Drive the full router, middleware stack included.

pub mod api;
