//! Public URLs of objects written with a `public-read` ACL

use std::fmt;

use serde::Serialize;

/// URL under which a publicly readable object is expected to be served
///
/// Built from bucket, region and key alone; it says nothing about whether the
/// object was actually written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PublicUrl(String);

impl PublicUrl {
    /// Virtual-hosted style URL for `key` in `bucket`
    #[must_use]
    pub fn for_object(bucket: &str, region: &str, key: &str) -> Self {
        Self(format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"))
    }

    /// Appends the `?ext=` hint consumers use to recover a media file's real type
    #[must_use]
    pub fn with_extension_hint(self, extension: &str) -> Self {
        Self(format!("{}?ext={extension}", self.0))
    }

    /// Returns the URL as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_format() {
        let url = PublicUrl::for_object("test-bucket", "us-west-2", "assets/abc.json");

        assert_eq!(
            url.as_str(),
            "https://test-bucket.s3.us-west-2.amazonaws.com/assets/abc.json"
        );
    }

    #[test]
    fn test_extension_hint() {
        let url =
            PublicUrl::for_object("b", "eu-central-1", "assets/abc.png").with_extension_hint("gif");

        assert_eq!(
            url.to_string(),
            "https://b.s3.eu-central-1.amazonaws.com/assets/abc.png?ext=gif"
        );
    }

    #[test]
    fn test_empty_extension_hint_keeps_query() {
        let url = PublicUrl::for_object("b", "us-west-2", "assets/abc.png").with_extension_hint("");

        assert!(url.as_str().ends_with("?ext="));
    }
}
