//! Local media files uploaded alongside a manifest

use std::path::{Path, PathBuf};

use aws_sdk_s3::primitives::{ByteStream, ByteStreamError};
use mime::Mime;

/// A local image or animation file and its inferred content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    path: PathBuf,
    content_type: Mime,
}

impl MediaAsset {
    /// Describes the file at `path`, guessing its content type from the extension
    ///
    /// Unknown extensions map to `application/octet-stream`. The file is not
    /// touched until [`MediaAsset::open`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let content_type = mime_guess::from_path(&path).first_or_octet_stream();
        Self { path, content_type }
    }

    /// Path of the file on disk
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content type sent with the upload
    #[must_use]
    pub const fn content_type(&self) -> &Mime {
        &self.content_type
    }

    /// File extension without the leading dot, empty when there is none
    #[must_use]
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Opens the file as a stream for the request body
    ///
    /// # Errors
    ///
    /// Returns `ByteStreamError` if the file cannot be opened or its metadata read
    pub async fn open(&self) -> Result<ByteStream, ByteStreamError> {
        ByteStream::from_path(&self.path).await
    }
}
