//! In-memory object store for tests

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use aws_sdk_s3::types::ObjectCannedAcl;

use super::{ObjectStore, PutObject, StorageError, StorageResult};

/// An object captured by [`InMemoryObjectStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Bucket the object was written to
    pub bucket: String,
    /// Object key
    pub key: String,
    /// Content type sent with the write
    pub content_type: String,
    /// ACL sent with the write
    pub acl: ObjectCannedAcl,
    /// Collected body bytes
    pub body: Vec<u8>,
}

/// Records every successful write; can be told to reject some or all of them
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    writes: Mutex<Vec<StoredObject>>,
    attempted_keys: Mutex<Vec<String>>,
    rejected_keys: HashSet<String>,
    unavailable: bool,
}

impl InMemoryObjectStore {
    /// Creates a store that accepts every write
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes to the given keys with an access error
    #[must_use]
    pub fn rejecting<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rejected_keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Creates a store that fails every write with an upstream error
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// All successful writes in order, including overwrites of the same key
    #[must_use]
    pub fn writes(&self) -> Vec<StoredObject> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Keys of every attempted write in order, successful or not
    #[must_use]
    pub fn attempted_keys(&self) -> Vec<String> {
        self.attempted_keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The latest successful write to `key`
    #[must_use]
    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.writes()
            .into_iter()
            .rev()
            .find(|object| object.key == key)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(&self, object: PutObject) -> StorageResult<()> {
        self.attempted_keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(object.key.clone());

        if self.unavailable {
            return Err(StorageError::UpstreamError(
                "ServiceUnavailable: please reduce your request rate".to_string(),
            ));
        }
        if self.rejected_keys.contains(&object.key) {
            return Err(StorageError::S3Error(format!(
                "AccessDenied: writes to {} are not permitted",
                object.key
            )));
        }

        let body = object
            .body
            .collect()
            .await
            .map_err(|e| StorageError::BodyError(e.to_string()))?
            .into_bytes()
            .to_vec();

        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredObject {
                bucket: object.bucket,
                key: object.key,
                content_type: object.content_type,
                acl: object.acl,
                body,
            });

        Ok(())
    }
}
