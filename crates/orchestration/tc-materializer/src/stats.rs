//! Statistics for materialization runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Statistics collected while materializing one project tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterializeStats {
    /// When materialization started
    pub started_at: Option<DateTime<Utc>>,

    /// When materialization completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Number of directory marker keys reproduced
    pub directories_created: usize,

    /// Number of file keys downloaded
    pub files_downloaded: usize,

    /// Total bytes written to the workspace
    pub bytes_downloaded: u64,
}

impl MaterializeStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Mark materialization as complete with the current time.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Record a reproduced directory marker.
    pub fn record_directory(&mut self) {
        self.directories_created += 1;
    }

    /// Record a downloaded file.
    pub fn record_file(&mut self, size_bytes: u64) {
        self.files_downloaded += 1;
        self.bytes_downloaded += size_bytes;
    }

    /// Get the duration of the run.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
