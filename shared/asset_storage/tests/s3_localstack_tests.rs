//! Round trip against LocalStack
//!
//! Run with `docker run -p 4566:4566 localstack/localstack` and
//! `cargo test -p asset_storage -- --ignored`.

mod common;

use std::sync::Arc;

use asset_storage::{BatchIdGenerator, CollectionUploader, S3ObjectStore};
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    types::{BucketLocationConstraint, CreateBucketConfiguration},
    Client as S3Client,
};
use common::*;
use pretty_assertions::assert_eq;

async fn localstack_client() -> S3Client {
    // Setup LocalStack client with hardcoded credentials for CI
    let credentials = Credentials::from_keys("test", "test", None);

    let config = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url("http://localhost:4566")
        .region(Region::new(TEST_REGION))
        .credentials_provider(credentials)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&config)
        .force_path_style(true)
        .build();

    S3Client::from_conf(s3_config)
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_collection_round_trip_through_localstack() {
    let client = Arc::new(localstack_client().await);
    let bucket = format!(
        "asset-storage-{}",
        BatchIdGenerator::from_entropy().next_id().as_str().to_lowercase()
    );

    client
        .create_bucket()
        .bucket(&bucket)
        .create_bucket_configuration(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::UsWest2)
                .build(),
        )
        .send()
        .await
        .expect("Failed to create bucket");

    let media = MediaDir::new();
    let image = media.write("cat.png", b"png bytes");
    let store = Arc::new(S3ObjectStore::new(client.clone()));
    let uploader = CollectionUploader::new(store, TEST_REGION);

    let upload = uploader
        .upload_collection(&bucket, &image, None, br#"{"name":"Cat"}"#)
        .await
        .expect("Upload should succeed");
    assert!(upload.is_complete(), "failed keys: {:?}", upload.failed_keys);

    let manifest = client
        .get_object()
        .bucket(&bucket)
        .key(format!("assets/{}.json", upload.batch_id))
        .send()
        .await
        .expect("Manifest should exist");
    assert_eq!(manifest.content_type(), Some("application/json"));

    let body = manifest.body.collect().await.unwrap().into_bytes();
    let manifest: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(manifest["image"], upload.urls.image_url.as_str());

    let image_object = client
        .get_object()
        .bucket(&bucket)
        .key(format!("assets/{}.png", upload.batch_id))
        .send()
        .await
        .expect("Image should exist");
    let image_bytes = image_object.body.collect().await.unwrap().into_bytes();
    assert_eq!(image_bytes.as_ref(), b"png bytes");
}
