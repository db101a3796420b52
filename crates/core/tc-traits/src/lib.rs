//! Core traits for treecheck.
//!
//! This crate defines the seams between the pipeline and its collaborators:
//! - [`ObjectStore`] - Trait for the remote store a project tree is read from (S3, in-memory)
//! - [`Verifier`] - Trait for the external checker run against a materialized tree

pub mod store;
pub mod verifier;

pub use store::*;
pub use verifier::*;
