//! Object store double
//!
//! Answers every PUT with a fixed status and remembers what it was sent.

use std::sync::Mutex;

use async_trait::async_trait;
use wall::backend::upload::{ObjectStore, PutObject, StorageError};

/// One object received by the fake store
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub content_type: String,
    pub content_length: u64,
    pub body: Vec<u8>,
}

#[derive(Debug)]
pub struct FakeObjectStore {
    status: u16,
    received: Mutex<Vec<StoredObject>>,
}

impl FakeObjectStore {
    pub fn answering(status: u16) -> Self {
        Self {
            status,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<StoredObject> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put_object(&self, object: PutObject<'_>) -> Result<u16, StorageError> {
        // The spooled file must still exist while storage reads it.
        let body = tokio::fs::read(object.path).await?;

        self.received.lock().unwrap().push(StoredObject {
            key: object.key.to_string(),
            content_type: object.content_type.to_string(),
            content_length: object.content_length,
            body,
        });

        Ok(self.status)
    }
}
