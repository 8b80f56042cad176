//! Command line arguments

use std::path::PathBuf;

use asset_storage::{KeyScheme, DEFAULT_REGION};
use clap::Parser;

/// Upload an image, an optional animation and their manifest to S3
#[derive(Debug, Clone, Parser)]
#[command(name = "collection-uploader", version)]
pub struct Args {
    /// Bucket the objects are written to
    #[arg(long, env = "S3_BUCKET_NAME")]
    pub bucket: String,

    /// Image file
    #[arg(long)]
    pub image: PathBuf,

    /// Animation file
    #[arg(long)]
    pub animation: Option<PathBuf>,

    /// Manifest JSON file; `image` and `animation_url` are overwritten
    #[arg(long)]
    pub manifest: PathBuf,

    /// Region of the bucket, also used to build public URLs
    #[arg(long, env = "S3_PUBLIC_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Give image and animation separate object keys
    #[arg(long)]
    pub per_asset_keys: bool,

    /// Fail if any object could not be written
    ///
    /// Without this flag URLs are printed even for objects that were never
    /// written; failures are only logged. With `APP_ENV` unset, writes go to
    /// LocalStack on localhost.
    #[arg(long)]
    pub strict: bool,
}

impl Args {
    /// Key scheme selected by `--per-asset-keys`
    #[must_use]
    pub const fn key_scheme(&self) -> KeyScheme {
        if self.per_asset_keys {
            KeyScheme::PerAsset
        } else {
            KeyScheme::Legacy
        }
    }
}
