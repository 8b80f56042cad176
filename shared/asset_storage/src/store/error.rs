//! Error types for object store operations

use aws_sdk_s3::{error::SdkError, operation::put_object::PutObjectError};
use thiserror::Error;

/// Result type for object store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while writing an object
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// AWS SDK error (dispatch, timeout, credentials)
    #[error("AWS SDK error: {0}")]
    AwsError(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),

    /// The request body could not be read
    #[error("Failed to read object body: {0}")]
    BodyError(String),
}

impl StorageError {
    /// Checks if this error represents an upstream (5xx) error
    #[must_use]
    pub const fn is_upstream_error(&self) -> bool {
        matches!(self, Self::UpstreamError(_))
    }
}

impl From<SdkError<PutObjectError>> for StorageError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) if err.raw().status().as_u16() >= 500 => {
                Self::UpstreamError(format!("{:?}", err.err()))
            }
            SdkError::ServiceError(err) => Self::S3Error(format!("{:?}", err.err())),
            _ => Self::AwsError(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_upstream_errors_are_upstream() {
        assert!(StorageError::UpstreamError("503".to_string()).is_upstream_error());
        assert!(!StorageError::S3Error("AccessDenied".to_string()).is_upstream_error());
        assert!(!StorageError::AwsError("timeout".to_string()).is_upstream_error());
        assert!(!StorageError::BodyError("eof".to_string()).is_upstream_error());
    }
}
