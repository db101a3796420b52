//! Key classification.
//!
//! Many object stores represent empty directories as zero-byte objects whose
//! key ends in the separator. Those keys must become empty local
//! directories, never zero-byte files.

use serde::{Deserialize, Serialize};

/// Path separator used by the store's key convention.
pub const KEY_SEPARATOR: char = '/';

/// What a remote key stands for on local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyKind {
    /// Key ends in the separator
    DirectoryMarker,
    /// Any other key
    FileEntry,
}

/// Classify a key by its final character alone.
pub fn classify(key: &str) -> KeyKind {
    if key.ends_with(KEY_SEPARATOR) {
        KeyKind::DirectoryMarker
    } else {
        KeyKind::FileEntry
    }
}

/// Keys of one listing partitioned by [`KeyKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedKeys {
    /// Directory marker keys, in listing order
    pub directories: Vec<String>,
    /// File keys, in listing order
    pub files: Vec<String>,
}

impl ClassifiedKeys {
    /// Partition keys by kind, preserving their relative order.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut classified = Self::default();
        for key in keys {
            match classify(&key) {
                KeyKind::DirectoryMarker => classified.directories.push(key),
                KeyKind::FileEntry => classified.files.push(key),
            }
        }
        classified
    }

    /// Total number of keys.
    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    /// Whether no keys were classified.
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }
}
