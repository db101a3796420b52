//! In-memory object store for testing and local development.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Mutex;
use tc_error::{StoreError, StoreResult};
use tc_traits::ObjectStore;
use tc_types::ListingPage;

/// A request observed by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    /// A listing page was requested
    List {
        prefix: String,
        continuation_token: Option<String>,
    },
    /// An object was downloaded
    Download { key: String },
}

/// Object store backed by an in-memory key → bytes map.
///
/// Keys are listed in lexicographic order, `page_size` keys per page, with
/// the offset of the next key as the continuation token. Listing and
/// download failures can be injected, and every request is recorded.
pub struct MemoryStore {
    bucket: String,
    objects: BTreeMap<String, Vec<u8>>,
    page_size: usize,
    listing_failure: Option<StoreError>,
    failing_downloads: HashSet<String>,
    requests: Mutex<Vec<StoreRequest>>,
}

impl MemoryStore {
    /// Create an empty store for `bucket` with a page size of 1000.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: BTreeMap::new(),
            page_size: 1000,
            listing_failure: None,
            failing_downloads: HashSet::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Add an object.
    pub fn with_object(mut self, key: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.objects.insert(key.into(), data.into());
        self
    }

    /// Set the number of keys per listing page (clamped to at least 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Make every listing request fail with `error`.
    pub fn with_listing_failure(mut self, error: StoreError) -> Self {
        self.listing_failure = Some(error);
        self
    }

    /// Make downloads of `key` fail.
    pub fn with_failing_download(mut self, key: impl Into<String>) -> Self {
        self.failing_downloads.insert(key.into());
        self
    }

    /// Requests observed so far, in order.
    pub fn requests(&self) -> Vec<StoreRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record(&self, request: StoreRequest) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
    }

    fn check_bucket(&self, bucket: &str) -> StoreResult<()> {
        if bucket == self.bucket {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("NoSuchBucket: {bucket}")))
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> StoreResult<ListingPage> {
        self.record(StoreRequest::List {
            prefix: prefix.to_string(),
            continuation_token: continuation_token.map(String::from),
        });
        self.check_bucket(bucket)?;

        if let Some(error) = &self.listing_failure {
            return Err(error.clone());
        }

        let offset = match continuation_token {
            Some(token) => token.parse::<usize>().map_err(|_| {
                StoreError::Request(format!("InvalidArgument: bad continuation token '{token}'"))
            })?,
            None => 0,
        };

        let matching: Vec<&String> = self
            .objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .collect();

        let end = (offset + self.page_size).min(matching.len());
        let keys = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|key| key.to_string())
            .collect();

        if end < matching.len() {
            Ok(ListingPage::with_continuation(keys, end.to_string()))
        } else {
            Ok(ListingPage::last(keys))
        }
    }

    async fn download(&self, bucket: &str, key: &str, destination: &Path) -> StoreResult<u64> {
        self.record(StoreRequest::Download {
            key: key.to_string(),
        });
        self.check_bucket(bucket)?;

        if self.failing_downloads.contains(key) {
            return Err(StoreError::Request(format!(
                "connection reset while downloading {key}"
            )));
        }

        let data = self
            .objects
            .get(key)
            .ok_or_else(|| StoreError::NotFound(format!("NoSuchKey: {key}")))?;

        tokio::fs::write(destination, data).await?;
        Ok(data.len() as u64)
    }
}
