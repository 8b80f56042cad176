//! Object store seam and its S3 implementation
//!
//! Uploads go through the [`ObjectStore`] trait so callers can inject a
//! pooled S3 client in production and an in-memory fake in tests.

mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
mod s3;

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, types::ObjectCannedAcl};

pub use error::{StorageError, StorageResult};
pub use s3::S3ObjectStore;

/// A single object write
#[derive(Debug)]
pub struct PutObject {
    /// Target bucket
    pub bucket: String,
    /// Object key within the bucket
    pub key: String,
    /// `Content-Type` stored with the object
    pub content_type: String,
    /// Canned ACL applied to the object
    pub acl: ObjectCannedAcl,
    /// Object contents, either a file stream or an in-memory buffer
    pub body: ByteStream,
}

impl PutObject {
    /// Builds a write that makes the object publicly readable
    #[must_use]
    pub fn public_read(
        bucket: impl Into<String>,
        key: impl Into<String>,
        content_type: impl Into<String>,
        body: ByteStream,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            content_type: content_type.into(),
            acl: ObjectCannedAcl::PublicRead,
            body,
        }
    }
}

/// Trait for storage backends able to write objects
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes one object, completing once the backend has acknowledged it
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when the backend rejects or fails the write
    async fn put_object(&self, object: PutObject) -> StorageResult<()>;
}
