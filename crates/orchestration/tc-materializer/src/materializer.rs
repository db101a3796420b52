//! Tree materialization.

use futures::{StreamExt, pin_mut, stream};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tc_error::{Result, StoreError, TcError};
use tc_traits::ObjectStore;
use tracing::{debug, info};

use crate::classify::ClassifiedKeys;
use crate::config::MaterializeConfig;
use crate::layout::local_path;
use crate::list::collect_keys;
use crate::reset::reset_workspace;
use crate::stats::MaterializeStats;

/// Reproduces the tree stored under a prefix on local storage.
///
/// Runs reset, listing, classification and download strictly in that
/// order. The store is shared, so one client can serve many jobs.
pub struct Materializer<S: ObjectStore + ?Sized> {
    store: Arc<S>,
    config: MaterializeConfig,
}

impl<S: ObjectStore + ?Sized> Materializer<S> {
    /// Create a new Materializer.
    ///
    /// # Arguments
    ///
    /// * `store` - The object store to list and download from
    /// * `config` - Bucket, workspace root and download concurrency
    pub fn new(store: Arc<S>, config: MaterializeConfig) -> Self {
        Self { store, config }
    }

    /// The materialization configuration.
    pub fn config(&self) -> &MaterializeConfig {
        &self.config
    }

    /// Clear the workspace, then materialize every key under `prefix` into it.
    ///
    /// The workspace is left on disk afterwards, including after a failure;
    /// it is cleared again at the start of the next run.
    pub async fn run(&self, prefix: &str) -> Result<MaterializeStats> {
        reset_workspace(&self.config.workspace_root).await?;

        let keys = collect_keys(self.store.as_ref(), &self.config.bucket, prefix).await?;
        let classified = ClassifiedKeys::from_keys(keys);

        debug!(
            prefix = %prefix,
            directories = classified.directories.len(),
            files = classified.files.len(),
            "Classified keys"
        );

        self.materialize(&classified).await
    }

    /// Materialize already classified keys into the workspace.
    ///
    /// Directory markers become (possibly empty) directories. Each file is
    /// downloaded after its parent directory has been created, so downloads
    /// may run concurrently up to the configured limit. The first failure
    /// aborts the run; downloads still in flight are dropped.
    ///
    /// Two file keys mapping onto the same local path (`p/a/b` and `p/a//b`)
    /// fail the run with the later key before anything is written.
    pub async fn materialize(&self, keys: &ClassifiedKeys) -> Result<MaterializeStats> {
        let mut stats = MaterializeStats::new();
        let files = self.plan_files(&keys.files)?;

        for key in &keys.directories {
            let path = self.local_path(key)?;
            tokio::fs::create_dir_all(&path)
                .await
                .map_err(|e| materialization_error(key, e.into()))?;
            stats.record_directory();
            debug!(key = %key, path = %path.display(), "Created directory");
        }

        let downloads = stream::iter(files)
            .map(|(key, path)| self.fetch(key, path))
            .buffer_unordered(self.config.concurrency.max(1));
        pin_mut!(downloads);

        while let Some(result) = downloads.next().await {
            let size = result?;
            stats.record_file(size);
        }

        stats.complete();

        info!(
            root = %self.config.workspace_root.display(),
            directories = stats.directories_created,
            files = stats.files_downloaded,
            bytes = stats.bytes_downloaded,
            "Materialization completed"
        );

        Ok(stats)
    }

    /// Pair every file key with its local path, rejecting shared paths.
    fn plan_files<'k>(&self, keys: &'k [String]) -> Result<Vec<(&'k str, PathBuf)>> {
        let mut owners: HashMap<PathBuf, &str> = HashMap::with_capacity(keys.len());
        let mut files = Vec::with_capacity(keys.len());

        for key in keys {
            let path = self.local_path(key)?;
            if let Some(first) = owners.insert(path.clone(), key) {
                return Err(materialization_error(
                    key,
                    StoreError::InvalidKey(format!(
                        "'{key}' maps onto {} like '{first}'",
                        path.display()
                    )),
                ));
            }
            files.push((key.as_str(), path));
        }

        Ok(files)
    }

    async fn fetch(&self, key: &str, path: PathBuf) -> Result<u64> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| materialization_error(key, e.into()))?;
        }

        let size = self
            .store
            .download(&self.config.bucket, key, &path)
            .await
            .map_err(|source| materialization_error(key, source))?;

        debug!(key = %key, size, "Downloaded object");
        Ok(size)
    }

    fn local_path(&self, key: &str) -> Result<PathBuf> {
        local_path(&self.config.workspace_root, key)
            .map_err(|source| materialization_error(key, source))
    }
}

fn materialization_error(key: &str, source: StoreError) -> TcError {
    TcError::Materialization {
        key: key.to_string(),
        source,
    }
}
