//! Error types and classification for treecheck.
//!
//! This crate provides:
//! - [`TcError`] - Top-level error enum for every pipeline stage
//! - [`StoreError`] - Errors raised by object store adapters
//! - [`ErrorKind`] - The stable, serializable failure taxonomy reported to callers
//! - [`classify_sdk_error`] - Maps SDK error codes onto [`StoreError`]

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for treecheck.
#[derive(Error, Debug)]
pub enum TcError {
    /// The workspace could not be cleared before a run
    #[error("Reset failed for {}: {source}", .path.display())]
    Reset {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Listing the keys under a prefix failed
    #[error("Listing failed for prefix '{prefix}': {source}")]
    Listing { prefix: String, source: StoreError },

    /// A key could not be reproduced on local storage
    #[error("Materialization failed for key '{key}': {source}")]
    Materialization { key: String, source: StoreError },

    /// The verifier could not be run (not a negative verification result)
    #[error("Invocation failed: {0}")]
    Invocation(String),

    /// Invalid request or configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TcError {
    /// The taxonomy entry for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Reset { .. } => ErrorKind::ResetFailed,
            Self::Listing { .. } => ErrorKind::ListingFailed,
            Self::Materialization { .. } => ErrorKind::MaterializationFailed,
            Self::Invocation(_) => ErrorKind::InvocationFailed,
            Self::Config(_) => ErrorKind::ConfigInvalid,
            Self::Other(_) => ErrorKind::Internal,
        }
    }

    /// The remote key or local path the failure is attributed to, if any.
    pub fn offending(&self) -> Option<String> {
        match self {
            Self::Reset { path, .. } => Some(path.display().to_string()),
            Self::Listing { prefix, .. } => Some(prefix.clone()),
            Self::Materialization { key, .. } => Some(key.clone()),
            _ => None,
        }
    }
}

/// Object store adapter errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Network or service failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Bucket or object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials rejected or insufficient
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Key cannot be mapped onto a local path
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Local filesystem failure while writing
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Failure taxonomy reported in job responses and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    ResetFailed,
    ListingFailed,
    MaterializationFailed,
    InvocationFailed,
    ConfigInvalid,
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResetFailed => write!(f, "ResetFailed"),
            Self::ListingFailed => write!(f, "ListingFailed"),
            Self::MaterializationFailed => write!(f, "MaterializationFailed"),
            Self::InvocationFailed => write!(f, "InvocationFailed"),
            Self::ConfigInvalid => write!(f, "ConfigInvalid"),
            Self::Internal => write!(f, "Internal"),
        }
    }
}

/// Classify an SDK error into a [`StoreError`].
///
/// Only the service error code and HTTP status are consulted; `message` is
/// carried as the diagnostic. Failures without either (connection errors,
/// timeouts) are [`StoreError::Request`].
pub fn classify_sdk_error(
    code: Option<&str>,
    status: Option<u16>,
    message: impl Into<String>,
) -> StoreError {
    let message = message.into();

    match (code, status) {
        (Some("NoSuchKey" | "NoSuchBucket" | "NotFound"), _) | (_, Some(404)) => {
            StoreError::NotFound(message)
        }
        (
            Some("AccessDenied" | "Forbidden" | "InvalidAccessKeyId" | "SignatureDoesNotMatch"),
            _,
        )
        | (_, Some(403)) => StoreError::AccessDenied(message),
        _ => StoreError::Request(message),
    }
}

/// Result type alias using TcError.
pub type Result<T> = std::result::Result<T, TcError>;

/// Result type alias for object store adapters.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
