//! tc-materializer - Object storage tree materialization for treecheck.
//!
//! This crate turns a flat, paginated key listing from an object store into
//! a local directory hierarchy. It provides:
//!
//! - Paginated key listing that follows continuation tokens to exhaustion
//! - Syntactic classification of keys into directory markers and file entries
//! - A pure mapping from remote keys onto local paths
//! - Workspace reset before each run
//! - Tree materialization with optional bounded download parallelism
//! - An S3 store adapter and an in-memory store for tests
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tc_materializer::{MaterializeConfig, Materializer, S3Config, S3Store, create_s3_client};
//!
//! let s3_config = S3Config::new().with_endpoint("http://localhost:4566");
//! let store = Arc::new(S3Store::new(create_s3_client(&s3_config).await?));
//!
//! let config = MaterializeConfig::new("my-bucket", "/tmp/workspace");
//! let materializer = Materializer::new(store, config);
//!
//! let stats = materializer.run("proj1/").await?;
//! eprintln!("Downloaded {} files", stats.files_downloaded);
//! ```

pub mod classify;
pub mod config;
pub mod layout;
pub mod list;
pub mod materializer;
pub mod memory;
pub mod reset;
pub mod s3;
pub mod stats;

pub use classify::{ClassifiedKeys, KEY_SEPARATOR, KeyKind, classify};
pub use config::MaterializeConfig;
pub use layout::{entry_path, local_path, project_key};
pub use list::{collect_keys, list_keys};
pub use materializer::Materializer;
pub use memory::{MemoryStore, StoreRequest};
pub use reset::reset_workspace;
pub use s3::{S3Config, S3Store, create_s3_client};
pub use stats::MaterializeStats;
