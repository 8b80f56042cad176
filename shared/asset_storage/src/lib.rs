//! Asset storage for collection items
//!
//! Uploads an image, an optional animation and a JSON manifest to an S3
//! bucket as publicly readable objects, patching the manifest so it points at
//! the uploaded media.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Batch identifiers
pub mod batch_id;
/// Collection upload orchestration
pub mod collection;
/// Manifest patching
pub mod manifest;
/// Local media files
pub mod media;
/// Public object URLs
pub mod public_url;
/// Object store seam and backends
pub mod store;
/// Single-object uploads
pub mod uploader;

pub use batch_id::{BatchId, BatchIdGenerator};
pub use collection::{
    CollectionUpload, CollectionUploader, CollectionUrls, KeyScheme, UploadError, UploadResult,
    DEFAULT_REGION,
};
pub use manifest::ManifestError;
pub use media::MediaAsset;
pub use public_url::PublicUrl;
pub use store::{ObjectStore, PutObject, S3ObjectStore, StorageError, StorageResult};
pub use uploader::{upload_object, UploadReceipt};
