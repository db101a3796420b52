//! Common utilities for integration tests.
//!
//! This module provides shared test infrastructure for LocalStack-based
//! integration testing: client setup, bucket fixtures and a sample project.

pub mod localstack;

pub use localstack::{LocalStackTestContext, SAMPLE_PROJECT};
