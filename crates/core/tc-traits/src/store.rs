//! Object store read interface.

use async_trait::async_trait;
use std::path::Path;
use tc_error::StoreResult;
use tc_types::ListingPage;

/// Read access to an object store.
///
/// The store is the sole source of truth for which keys exist under a
/// prefix. Implementations include:
/// - AWS S3 (production, LocalStack for integration tests)
/// - In-memory store (for testing/development)
///
/// Implementations must not retry internally on behalf of the pipeline; a
/// failed request is reported as-is and ends the job.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches one page of keys under `prefix`.
    ///
    /// # Arguments
    ///
    /// * `bucket` - Bucket to list
    /// * `prefix` - Key prefix to list under
    /// * `continuation_token` - Token from the previous page, `None` on the first request
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> StoreResult<ListingPage>;

    /// Downloads the object at `key` into `destination`, overwriting any
    /// existing file. The parent directory of `destination` must exist.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> StoreResult<u64>;
}
