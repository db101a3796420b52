//! LocalStack test context and utilities.

use aws_sdk_s3::Client as S3Client;

/// A small project tree: `(key, contents)`, directory markers have empty contents.
pub const SAMPLE_PROJECT: &[(&str, &str)] = &[
    ("proj1/", ""),
    ("proj1/lib/", ""),
    ("proj1/lib/helper.agda", "module lib.helper where\n"),
    (
        "proj1/main.agda",
        "module main where\n\nopen import lib.helper\n",
    ),
];

/// LocalStack test context providing an S3 client.
pub struct LocalStackTestContext {
    pub s3: S3Client,
    pub endpoint: String,
    pub region: String,
}

impl LocalStackTestContext {
    /// Create a new LocalStack test context.
    ///
    /// Uses the `LOCALSTACK_ENDPOINT` environment variable if set,
    /// otherwise defaults to `http://localhost:4566`.
    pub async fn new() -> Self {
        let endpoint = std::env::var("LOCALSTACK_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4566".to_string());
        let region = "us-east-1".to_string();

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(region.clone()))
            .endpoint_url(&endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        Self {
            s3: S3Client::from_conf(s3_config),
            endpoint,
            region,
        }
    }

    /// Check if LocalStack is available and healthy.
    pub async fn is_available(&self) -> bool {
        self.s3.list_buckets().send().await.is_ok()
    }

    /// Create an S3 bucket for testing if it does not exist yet.
    pub async fn create_bucket(&self, name: &str) -> Result<(), aws_sdk_s3::Error> {
        let buckets = self.s3.list_buckets().send().await?;
        let exists = buckets
            .buckets()
            .iter()
            .any(|b| b.name().unwrap_or_default() == name);

        if !exists {
            self.s3.create_bucket().bucket(name).send().await?;
        }
        Ok(())
    }

    /// Upload an object.
    pub async fn put(&self, bucket: &str, key: &str, data: &[u8]) -> Result<(), aws_sdk_s3::Error> {
        self.s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(data.to_vec().into())
            .send()
            .await?;
        Ok(())
    }

    /// Upload every `(key, contents)` pair.
    pub async fn put_tree(
        &self,
        bucket: &str,
        tree: &[(&str, &str)],
    ) -> Result<(), aws_sdk_s3::Error> {
        for (key, contents) in tree {
            self.put(bucket, key, contents.as_bytes()).await?;
        }
        Ok(())
    }
}
