//! S3 client configuration and creation.

use aws_config::BehaviorVersion;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_s3::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tc_error::Result;

/// Default per-operation timeout for S3 requests.
pub const DEFAULT_S3_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by every S3 request of one process.
///
/// The bucket is not part of the connection; it comes with each
/// materialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// AWS region
    pub region: Option<String>,

    /// Custom endpoint URL (LocalStack); switches to path-style addressing
    pub endpoint: Option<String>,

    /// Explicit access key, used together with `secret_key`
    pub access_key: Option<String>,

    /// Explicit secret key
    pub secret_key: Option<String>,

    /// Named profile from the shared AWS config files
    pub profile: Option<String>,

    /// Per-operation timeout in seconds (0 = SDK default, no limit)
    pub timeout_secs: u64,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: None,
            endpoint: None,
            access_key: None,
            secret_key: None,
            profile: None,
            timeout_secs: DEFAULT_S3_TIMEOUT_SECS,
        }
    }
}

impl S3Config {
    /// Create a configuration resolving everything from the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a custom endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Use static credentials instead of the default provider chain.
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the AWS profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the per-operation timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The per-operation timeout, if one is configured.
    pub fn operation_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Create an S3 client from configuration.
///
/// The client is meant to be created once and shared by every job.
pub async fn create_s3_client(config: &S3Config) -> Result<Client> {
    use aws_config::Region;

    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
        let credentials = aws_sdk_s3::config::Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "tc-materializer",
        );
        loader = loader.credentials_provider(credentials);
    }

    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }

    if let Some(timeout) = config.operation_timeout() {
        loader = loader.timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(timeout)
                .build(),
        );
    }

    let sdk_config = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
    if config.endpoint.is_some() {
        builder = builder.force_path_style(true);
    }

    Ok(Client::from_conf(builder.build()))
}
