//! Single-object uploads that always yield a public URL

use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info};

use crate::public_url::PublicUrl;
use crate::store::{ObjectStore, PutObject, StorageError, StorageResult};

/// Outcome of one upload
///
/// The URL is computed whether or not the write succeeded; `outcome` tells
/// the two apart so callers can decide whether a failure matters.
#[derive(Debug)]
#[must_use]
pub struct UploadReceipt {
    /// Object key that was written
    pub key: String,
    /// Public URL of the object
    pub url: PublicUrl,
    /// Result of the write request
    pub outcome: StorageResult<()>,
}

impl UploadReceipt {
    /// Whether the backend acknowledged the write
    #[must_use]
    pub const fn is_uploaded(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Returns the URL, or the write error if the upload failed
    ///
    /// # Errors
    ///
    /// Returns the `StorageError` the backend reported
    pub fn into_result(self) -> Result<PublicUrl, StorageError> {
        self.outcome.map(|()| self.url)
    }
}

/// Writes `body` to `bucket`/`key` as a publicly readable object
///
/// Failures are logged at debug level and reported in the receipt rather
/// than returned, so a batch keeps going after a failed write.
pub async fn upload_object(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    content_type: &str,
    body: ByteStream,
    region: &str,
) -> UploadReceipt {
    let outcome = store
        .put_object(PutObject::public_read(bucket, key, content_type, body))
        .await;

    match &outcome {
        Ok(()) => info!(key, "uploaded object"),
        Err(e) => debug!(
            key,
            error = %e,
            upstream = e.is_upstream_error(),
            "object upload failed"
        ),
    }

    let url = PublicUrl::for_object(bucket, region, key);
    debug!(url = %url, "object location");

    UploadReceipt {
        key: key.to_string(),
        url,
        outcome,
    }
}
