//! API integration tests
//!
//! Integration tests for all HTTP endpoints

mod csrf_test;
mod session_test;
mod upload_test;
