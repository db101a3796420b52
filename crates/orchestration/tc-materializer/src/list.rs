//! Paginated key listing.

use async_stream::try_stream;
use futures::{Stream, TryStreamExt};
use std::collections::HashSet;
use tc_error::{Result, StoreError, TcError};
use tc_traits::ObjectStore;
use tracing::{debug, warn};

/// List every key under `prefix`, following continuation tokens until a
/// page reports none.
///
/// Returns a lazy stream of keys. Each key is yielded at most once, even if
/// the store repeats it across pages. Empty keys and keys outside `prefix`
/// are skipped. A page that hands back the token it was requested with is
/// treated as a failed listing rather than followed forever.
///
/// The stream is not restartable; calling again lists from the beginning.
///
/// # Example
///
/// ```ignore
/// use futures::{StreamExt, pin_mut};
///
/// let stream = list_keys(&store, "my-bucket", "proj1/");
/// pin_mut!(stream);
///
/// while let Some(key) = stream.next().await {
///     println!("Found: {}", key?);
/// }
/// ```
pub fn list_keys<'a, S>(
    store: &'a S,
    bucket: &'a str,
    prefix: &'a str,
) -> impl Stream<Item = Result<String>> + 'a
where
    S: ObjectStore + ?Sized,
{
    try_stream! {
        let mut continuation_token: Option<String> = None;
        let mut seen: HashSet<String> = HashSet::new();
        let mut pages = 0usize;

        loop {
            let page = store
                .list_page(bucket, prefix, continuation_token.as_deref())
                .await
                .map_err(|source| listing_error(prefix, source))?;
            pages += 1;

            for key in page.keys {
                if key.is_empty() {
                    continue;
                }

                if !key.starts_with(prefix) {
                    warn!(prefix = %prefix, key = %key, "Skipping key outside prefix");
                    continue;
                }

                if !seen.insert(key.clone()) {
                    debug!(key = %key, "Skipping duplicate key");
                    continue;
                }

                yield key;
            }

            match page.next_continuation_token {
                Some(token) => {
                    if continuation_token.as_deref() == Some(token.as_str()) {
                        Err::<(), TcError>(listing_error(
                            prefix,
                            StoreError::Request(format!("continuation token '{token}' repeated")),
                        ))?;
                    }
                    continuation_token = Some(token);
                }
                None => break,
            }
        }

        debug!(prefix = %prefix, pages, keys = seen.len(), "Listing completed");
    }
}

/// List every key under `prefix` into a vector.
pub async fn collect_keys<S>(store: &S, bucket: &str, prefix: &str) -> Result<Vec<String>>
where
    S: ObjectStore + ?Sized,
{
    list_keys(store, bucket, prefix).try_collect().await
}

fn listing_error(prefix: &str, source: StoreError) -> TcError {
    TcError::Listing {
        prefix: prefix.to_string(),
        source,
    }
}
