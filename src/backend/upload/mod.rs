//! Upload Relay Module
//!
//! Moves user files from a multipart request to the object-storage bucket.
//!
//! # Module Structure
//!
//! ```text
//! upload/
//! ├── mod.rs      - Module exports and documentation
//! ├── spool.rs    - Multipart spooling and the temp-file guard
//! ├── storage.rs  - ObjectStore trait and the S3 client
//! ├── signing.rs  - AWS Signature V4
//! └── handlers.rs - POST /upload
//! ```

pub mod handlers;
pub mod signing;
pub mod spool;
pub mod storage;

pub use handlers::upload_image;
pub use storage::{ObjectStore, PutObject, S3Client, StorageError};
