//! tc-runner - Verification job pipeline for treecheck.
//!
//! A job materializes the project tree stored under a prefix, runs the
//! external verifier against the project's entry file, and packages the
//! outcome as a [`JobResponse`](tc_types::JobResponse). Every failure is
//! translated into a response; [`JobRunner::run`] never returns an error.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tc_materializer::{MaterializeConfig, Materializer, MemoryStore};
//! use tc_runner::{CommandVerifier, JobRunner, RunnerConfig, VerifierConfig};
//! use tc_types::JobRequest;
//!
//! let store = Arc::new(MemoryStore::new("bucket").with_object("proj1/main.agda", "module main where"));
//! let materializer = Materializer::new(store, MaterializeConfig::new("bucket", "/tmp/ws"));
//! let verifier = CommandVerifier::new(VerifierConfig::default());
//! let runner = JobRunner::new(materializer, verifier, RunnerConfig::default());
//!
//! let response = runner.run(&JobRequest::new("proj1/")).await;
//! println!("{}", response.status_code);
//! ```

pub mod config;
pub mod packager;
pub mod runner;
pub mod verifier;

pub use config::{IncludeRoot, RunnerConfig, VerifierConfig};
pub use packager::{package_failure, package_output};
pub use runner::JobRunner;
pub use verifier::CommandVerifier;
