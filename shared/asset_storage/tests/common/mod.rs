// Not every helper is used in every test binary
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use asset_storage::{store::mock::InMemoryObjectStore, BatchIdGenerator, CollectionUploader};
use tempfile::TempDir;

pub const TEST_BUCKET: &str = "test-bucket";
pub const TEST_REGION: &str = "us-west-2";

/// Temporary directory holding media files for one test
pub struct MediaDir {
    dir: TempDir,
}

impl MediaDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Writes `contents` to `name` inside the directory
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write media file");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Uploader over `store` with a fixed id seed
pub fn seeded_uploader(store: Arc<InMemoryObjectStore>) -> CollectionUploader {
    CollectionUploader::new(store, TEST_REGION).with_id_generator(BatchIdGenerator::seeded(1234))
}

/// Parses the body of a stored manifest
pub fn stored_manifest(store: &InMemoryObjectStore, key: &str) -> serde_json::Value {
    let object = store
        .object(key)
        .unwrap_or_else(|| panic!("No object stored under {key}"));
    serde_json::from_slice(&object.body).expect("Stored manifest is not JSON")
}

/// Strips the public URL prefix, leaving the object key and query
pub fn url_key(url: &str) -> &str {
    url.strip_prefix(&format!("https://{TEST_BUCKET}.s3.{TEST_REGION}.amazonaws.com/"))
        .expect("URL does not point into the test bucket")
}
