//! Shared types for treecheck.
//!
//! This crate defines the data passed between pipeline stages and across the
//! job boundary:
//! - [`JobRequest`] / [`JobResponse`] - The request/response payloads of one job
//! - [`VerificationOutput`] - Captured exit status and output of the verifier
//! - [`ListingPage`] - One page of a paginated key listing

pub mod job;
pub mod listing;

pub use job::{
    JobFailure, JobRequest, JobResponse, STATUS_FAILED, STATUS_OK, VerificationOutput,
    parse_job_request,
};
pub use listing::ListingPage;
