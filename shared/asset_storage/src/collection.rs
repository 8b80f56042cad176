//! Uploading an image, an optional animation and their manifest as one batch

use std::path::{Path, PathBuf};
use std::sync::Arc;

use aws_sdk_s3::primitives::{ByteStream, ByteStreamError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::batch_id::{BatchId, BatchIdGenerator};
use crate::manifest::{patch_manifest, ManifestError};
use crate::media::MediaAsset;
use crate::public_url::PublicUrl;
use crate::store::ObjectStore;
use crate::uploader::{upload_object, UploadReceipt};

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "us-west-2";

const ASSET_PREFIX: &str = "assets";
const MANIFEST_CONTENT_TYPE: &str = "application/json";

/// Result type for collection uploads
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that stop a collection upload
#[derive(Error, Debug)]
pub enum UploadError {
    /// A media file could not be opened
    #[error("failed to read media file {}: {source}", .path.display())]
    ReadMedia {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: ByteStreamError,
    },

    /// The manifest could not be patched
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// One or more objects were not acknowledged by the store
    #[error("objects failed to upload: {}", .failed_keys.join(", "))]
    IncompleteUpload {
        /// Keys whose write failed
        failed_keys: Vec<String>,
    },
}

/// How media object keys are derived from the batch id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyScheme {
    /// Image and animation both go to `assets/{id}.png`
    ///
    /// When an animation is present it overwrites the image object; the
    /// returned URLs differ only in their `?ext=` hint.
    #[default]
    Legacy,
    /// Image at `assets/{id}.{ext}`, animation at `assets/{id}-animation.{ext}`
    PerAsset,
}

#[derive(Debug, Clone, Copy)]
enum MediaRole {
    Image,
    Animation,
}

impl KeyScheme {
    fn media_key(self, id: &BatchId, role: MediaRole, asset: &MediaAsset) -> String {
        match self {
            Self::Legacy => format!("{ASSET_PREFIX}/{id}.png"),
            Self::PerAsset => {
                let extension = match asset.extension() {
                    ext if ext.is_empty() => "bin".to_string(),
                    ext => ext,
                };
                match role {
                    MediaRole::Image => format!("{ASSET_PREFIX}/{id}.{extension}"),
                    MediaRole::Animation => {
                        format!("{ASSET_PREFIX}/{id}-animation.{extension}")
                    }
                }
            }
        }
    }

    fn manifest_key(id: &BatchId) -> String {
        format!("{ASSET_PREFIX}/{id}.json")
    }
}

/// Public URLs of one uploaded collection item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionUrls {
    /// URL of the patched manifest
    pub metadata_url: PublicUrl,
    /// URL of the image, with `?ext=` hint
    pub image_url: PublicUrl,
    /// URL of the animation, with `?ext=` hint, if one was uploaded
    pub animation_url: Option<PublicUrl>,
}

impl CollectionUrls {
    /// Returns `(metadata_url, image_url, animation_url)`
    #[must_use]
    pub fn into_tuple(self) -> (PublicUrl, PublicUrl, Option<PublicUrl>) {
        (self.metadata_url, self.image_url, self.animation_url)
    }
}

/// Everything a collection upload produced
#[derive(Debug)]
#[must_use]
pub struct CollectionUpload {
    /// Identifier prefixing every key of the batch
    pub batch_id: BatchId,
    /// URLs of the batch, computed whether or not the writes succeeded
    pub urls: CollectionUrls,
    /// Keys whose write failed, in upload order
    pub failed_keys: Vec<String>,
}

impl CollectionUpload {
    /// Whether every write was acknowledged
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_keys.is_empty()
    }

    /// Returns the URLs only if every write succeeded
    ///
    /// # Errors
    ///
    /// Returns `UploadError::IncompleteUpload` listing the failed keys
    pub fn ensure_uploaded(self) -> UploadResult<CollectionUrls> {
        if self.is_complete() {
            Ok(self.urls)
        } else {
            Err(UploadError::IncompleteUpload {
                failed_keys: self.failed_keys,
            })
        }
    }
}

/// Uploads collection items through an injected object store
pub struct CollectionUploader {
    store: Arc<dyn ObjectStore>,
    region: String,
    ids: BatchIdGenerator,
    key_scheme: KeyScheme,
}

impl CollectionUploader {
    /// Creates an uploader with entropy-seeded ids and the legacy key scheme
    ///
    /// # Arguments
    ///
    /// * `store` - Object store every write goes through
    /// * `region` - Region the bucket lives in, used to build public URLs
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, region: impl Into<String>) -> Self {
        Self {
            store,
            region: region.into(),
            ids: BatchIdGenerator::from_entropy(),
            key_scheme: KeyScheme::default(),
        }
    }

    /// Replaces the batch id generator
    #[must_use]
    pub fn with_id_generator(mut self, ids: BatchIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Replaces the key scheme
    #[must_use]
    pub fn with_key_scheme(mut self, key_scheme: KeyScheme) -> Self {
        self.key_scheme = key_scheme;
        self
    }

    /// Uploads an image, an optional animation and the patched manifest
    ///
    /// Writes happen in order: image, animation, manifest. A failed write does
    /// not stop the batch; its key is listed in
    /// [`CollectionUpload::failed_keys`]. An empty `animation` path counts as
    /// no animation.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::ReadMedia` if a media file cannot be opened and
    /// `UploadError::Manifest` if the manifest is not a JSON object. In both
    /// cases earlier media writes may already have happened.
    pub async fn upload_collection(
        &self,
        bucket: &str,
        image: &Path,
        animation: Option<&Path>,
        manifest: &[u8],
    ) -> UploadResult<CollectionUpload> {
        let batch_id = self.ids.next_id();
        info!(batch_id = %batch_id, bucket, "uploading collection item");

        let mut failed_keys = Vec::new();

        let image = MediaAsset::new(image);
        let image_url = self
            .upload_media(bucket, &batch_id, MediaRole::Image, &image, &mut failed_keys)
            .await?;

        let animation_url = match animation.filter(|path| !path.as_os_str().is_empty()) {
            Some(path) => {
                let animation = MediaAsset::new(path);
                Some(
                    self.upload_media(
                        bucket,
                        &batch_id,
                        MediaRole::Animation,
                        &animation,
                        &mut failed_keys,
                    )
                    .await?,
                )
            }
            None => None,
        };

        let patched = patch_manifest(manifest, &image_url, animation_url.as_ref())?;

        let manifest_key = KeyScheme::manifest_key(&batch_id);
        let receipt = upload_object(
            self.store.as_ref(),
            bucket,
            &manifest_key,
            MANIFEST_CONTENT_TYPE,
            ByteStream::from(patched),
            &self.region,
        )
        .await;
        let metadata_url = Self::record(receipt, &mut failed_keys);

        Ok(CollectionUpload {
            batch_id,
            urls: CollectionUrls {
                metadata_url,
                image_url,
                animation_url,
            },
            failed_keys,
        })
    }

    async fn upload_media(
        &self,
        bucket: &str,
        batch_id: &BatchId,
        role: MediaRole,
        asset: &MediaAsset,
        failed_keys: &mut Vec<String>,
    ) -> UploadResult<PublicUrl> {
        let key = self.key_scheme.media_key(batch_id, role, asset);
        debug!(media = %asset.path().display(), key = %key, ?role, "uploading media");

        let body = asset.open().await.map_err(|source| UploadError::ReadMedia {
            path: asset.path().to_path_buf(),
            source,
        })?;

        let receipt = upload_object(
            self.store.as_ref(),
            bucket,
            &key,
            asset.content_type().as_ref(),
            body,
            &self.region,
        )
        .await;

        Ok(Self::record(receipt, failed_keys).with_extension_hint(&asset.extension()))
    }

    fn record(receipt: UploadReceipt, failed_keys: &mut Vec<String>) -> PublicUrl {
        if !receipt.is_uploaded() {
            failed_keys.push(receipt.key);
        }
        receipt.url
    }
}
