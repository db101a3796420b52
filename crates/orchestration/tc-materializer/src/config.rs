//! Configuration types for materialization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for materializing project trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterializeConfig {
    /// Bucket the project trees are read from
    pub bucket: String,

    /// Local root every key is materialized under
    pub workspace_root: PathBuf,

    /// Maximum concurrent downloads (1 = sequential)
    pub concurrency: usize,
}

impl MaterializeConfig {
    /// Create a sequential configuration for the given bucket and workspace root.
    pub fn new(bucket: impl Into<String>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            bucket: bucket.into(),
            workspace_root: workspace_root.into(),
            concurrency: 1,
        }
    }

    /// Set the maximum number of concurrent downloads (clamped to at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
