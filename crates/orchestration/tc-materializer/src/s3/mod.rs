//! S3 client and store adapter.
//!
//! This module provides S3 access for materialization:
//! - Client configuration with LocalStack support
//! - An [`ObjectStore`](tc_traits::ObjectStore) implementation over `aws-sdk-s3`

mod client;
mod store;

pub use client::{DEFAULT_S3_TIMEOUT_SECS, S3Config, create_s3_client};
pub use store::S3Store;
