//! Rewriting manifest JSON to point at uploaded media

use serde_json::{Map, Value};
use thiserror::Error;

use crate::public_url::PublicUrl;

/// Manifest field holding the image URL
pub const IMAGE_FIELD: &str = "image";
/// Manifest field holding the animation URL
pub const ANIMATION_FIELD: &str = "animation_url";

/// Errors raised while patching a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The buffer is not valid JSON
    #[error("manifest is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The JSON is valid but has no fields to set
    #[error("manifest must be a JSON object")]
    NotAnObject,

    /// The patched manifest could not be serialized
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Returns a copy of `manifest` with `image` (and `animation_url`) set
///
/// Other fields keep their values and order. The input buffer is not modified.
/// Invalid UTF-8 sequences are replaced with U+FFFD before parsing.
///
/// # Errors
///
/// Returns `ManifestError::Parse` for malformed JSON and
/// `ManifestError::NotAnObject` when the top-level value is not an object
pub fn patch_manifest(
    manifest: &[u8],
    image_url: &PublicUrl,
    animation_url: Option<&PublicUrl>,
) -> Result<Vec<u8>, ManifestError> {
    let text = String::from_utf8_lossy(manifest);
    let mut fields: Map<String, Value> = match serde_json::from_str(&text) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => return Err(ManifestError::NotAnObject),
        Err(e) => return Err(ManifestError::Parse(e)),
    };

    fields.insert(IMAGE_FIELD.to_string(), Value::from(image_url.as_str()));
    if let Some(animation_url) = animation_url {
        fields.insert(ANIMATION_FIELD.to_string(), Value::from(animation_url.as_str()));
    }

    serde_json::to_vec(&Value::Object(fields)).map_err(ManifestError::Serialize)
}
