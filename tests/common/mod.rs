//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An application fixture wired to in-memory collaborators
//! - A fake object store
//! - A cookie-keeping client that drives the router in-process
//! - Multipart body construction

pub mod app;
pub mod mock_storage;
pub mod multipart;

// Re-export commonly used utilities
pub use app::*;
pub use client::*;
pub use mock_storage::*;
pub use multipart::*;
