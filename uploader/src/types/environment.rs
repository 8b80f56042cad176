//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};

const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development {
        /// Optional override for the S3 endpoint
        endpoint_override: Option<String>,
    },
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development {
                endpoint_override: env::var("AWS_ENDPOINT_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
            },
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            Self::Development { endpoint_override } => {
                Some(endpoint_override.as_deref().unwrap_or(LOCALSTACK_ENDPOINT))
            }
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self, region: &str) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self, region: &str) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config(region).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&aws_config);

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development { .. }) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        // Test development (default)
        env::remove_var("APP_ENV");
        env::remove_var("AWS_ENDPOINT_URL");
        assert_eq!(
            Environment::from_env(),
            Environment::Development {
                endpoint_override: None
            }
        );

        // Test explicit development
        env::set_var("APP_ENV", " Development ");
        assert_eq!(
            Environment::from_env(),
            Environment::Development {
                endpoint_override: None
            }
        );

        // Test staging
        env::set_var("APP_ENV", "staging");
        assert_eq!(Environment::from_env(), Environment::Staging);

        // Test production
        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Environment::Production);

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "Invalid environment: invalid")]
    fn test_invalid_environment() {
        env::set_var("APP_ENV", "invalid");
        let _ = Environment::from_env();
    }

    #[test]
    #[serial]
    fn test_development_endpoint_override() {
        env::set_var("APP_ENV", "development");
        env::set_var("AWS_ENDPOINT_URL", "http://127.0.0.1:9000");

        let env = Environment::from_env();
        assert_eq!(env.override_aws_endpoint_url(), Some("http://127.0.0.1:9000"));

        // Blank values fall back to LocalStack
        env::set_var("AWS_ENDPOINT_URL", "  ");
        let env = Environment::from_env();
        assert_eq!(env.override_aws_endpoint_url(), Some(LOCALSTACK_ENDPOINT));

        // Cleanup
        env::remove_var("AWS_ENDPOINT_URL");
        env::remove_var("APP_ENV");
    }

    #[test]
    fn test_deployed_environments_use_aws_endpoints() {
        assert_eq!(Environment::Production.override_aws_endpoint_url(), None);
        assert_eq!(Environment::Staging.override_aws_endpoint_url(), None);
        assert!(Environment::Production.json_logs());
        assert!(!Environment::Development {
            endpoint_override: None
        }
        .json_logs());
    }
}
