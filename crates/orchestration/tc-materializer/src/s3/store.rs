//! S3-backed object store.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use std::path::Path;
use tc_error::{StoreError, StoreResult, classify_sdk_error};
use tc_traits::ObjectStore;
use tc_types::ListingPage;
use tracing::trace;

/// [`ObjectStore`] over an `aws-sdk-s3` client.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Wrap an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Build a listing page from the fields of a `ListObjectsV2` response.
///
/// A truncated page without a token would silently drop the remainder, so
/// it is reported instead.
fn page_from_parts(
    keys: Vec<String>,
    is_truncated: Option<bool>,
    continuation_token: Option<&str>,
) -> Result<ListingPage, &'static str> {
    if is_truncated != Some(true) {
        return Ok(ListingPage::last(keys));
    }

    match continuation_token {
        Some(token) => Ok(ListingPage::with_continuation(keys, token)),
        None => Err("truncated without a continuation token"),
    }
}

/// Classify an SDK failure by its service error code and HTTP status.
fn sdk_store_error<E>(err: &SdkError<E>, context: String) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let status = err.raw_response().map(|resp| resp.status().as_u16());
    classify_sdk_error(
        err.code(),
        status,
        format!("{context}: {}", DisplayErrorContext(err)),
    )
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> StoreResult<ListingPage> {
        let mut req = self.client.list_objects_v2().bucket(bucket).prefix(prefix);

        if let Some(token) = continuation_token {
            req = req.continuation_token(token);
        }

        let resp = req.send().await.map_err(|e| {
            sdk_store_error(&e, format!("S3 list objects failed for s3://{bucket}/{prefix}"))
        })?;

        let keys: Vec<String> = resp
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(String::from))
            .collect();

        trace!(bucket = bucket, prefix = prefix, keys = keys.len(), "Listed page");

        page_from_parts(keys, resp.is_truncated(), resp.next_continuation_token()).map_err(
            |reason| StoreError::Request(format!("S3 listing of s3://{bucket}/{prefix} {reason}")),
        )
    }

    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> StoreResult<u64> {
        let result = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| sdk_store_error(&e, format!("Failed to download s3://{bucket}/{key}")))?;

        let data = result
            .body
            .collect()
            .await
            .map_err(|e| {
                StoreError::Request(format!("Failed to read body for s3://{bucket}/{key}: {e}"))
            })?
            .into_bytes();

        tokio::fs::write(destination, &data).await?;

        trace!(bucket = bucket, key = key, size = data.len(), "Downloaded object");

        Ok(data.len() as u64)
    }
}
