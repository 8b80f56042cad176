//! Command line uploader for collection assets

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Command line arguments
pub mod cli;

/// Environment configuration
pub mod types;

use std::sync::Arc;

use anyhow::Context;
use asset_storage::{CollectionUploader, CollectionUrls, ObjectStore, S3ObjectStore};
use aws_sdk_s3::Client as S3Client;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::types::Environment;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Log filter from `RUST_LOG`, falling back to `warn` so failed writes are
/// reported even without explicit configuration
#[must_use]
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Renders the URLs as the single JSON line printed on stdout
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn render_urls(urls: &CollectionUrls) -> serde_json::Result<String> {
    serde_json::to_string(urls)
}

/// Uploads the collection item described by `args` to S3
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or the upload fails
pub async fn run(args: Args, environment: &Environment) -> anyhow::Result<CollectionUrls> {
    let s3_client = Arc::new(S3Client::from_conf(
        environment.s3_client_config(&args.region).await,
    ));
    run_with_store(args, Arc::new(S3ObjectStore::new(s3_client))).await
}

/// Uploads the collection item described by `args` through `store`
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, a media file or the
/// manifest is invalid, or, with `--strict`, any object failed to upload
pub async fn run_with_store(
    args: Args,
    store: Arc<dyn ObjectStore>,
) -> anyhow::Result<CollectionUrls> {
    let manifest = tokio::fs::read(&args.manifest)
        .await
        .with_context(|| format!("Failed to read manifest {}", args.manifest.display()))?;

    let uploader =
        CollectionUploader::new(store, args.region.clone()).with_key_scheme(args.key_scheme());

    let upload = uploader
        .upload_collection(
            &args.bucket,
            &args.image,
            args.animation.as_deref(),
            &manifest,
        )
        .await?;

    if args.strict {
        return Ok(upload.ensure_uploaded()?);
    }

    if !upload.is_complete() {
        warn!(
            batch_id = %upload.batch_id,
            failed_keys = ?upload.failed_keys,
            "Some objects failed to upload; returned URLs may not resolve"
        );
    }

    Ok(upload.urls)
}
