//! S3-backed object store

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use tracing::debug;

use super::{ObjectStore, PutObject, StorageResult};

/// Object store writing to AWS S3 (or an S3-compatible endpoint)
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    s3_client: Arc<S3Client>,
}

impl S3ObjectStore {
    /// Creates a new S3 object store
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client, shared with other users
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, object: PutObject) -> StorageResult<()> {
        debug!(
            bucket = %object.bucket,
            key = %object.key,
            content_type = %object.content_type,
            "Sending PutObject request"
        );

        self.s3_client
            .put_object()
            .bucket(object.bucket)
            .key(object.key)
            .content_type(object.content_type)
            .acl(object.acl)
            .body(object.body)
            .send()
            .await?;

        Ok(())
    }
}
