//! The job pipeline.

use std::path::PathBuf;
use tc_error::{Result, TcError};
use tc_materializer::{Materializer, entry_path, local_path};
use tc_traits::{ObjectStore, Verifier};
use tc_types::{JobRequest, JobResponse, VerificationOutput, parse_job_request};
use tracing::{error, info};

use crate::config::{IncludeRoot, RunnerConfig};
use crate::packager::{package_failure, package_output};

/// Runs verification jobs: reset, list, classify, materialize, verify, package.
///
/// Each stage completes before the next begins. Jobs sharing a runner share
/// its workspace, so they must not run concurrently.
pub struct JobRunner<S: ObjectStore + ?Sized, V: Verifier> {
    materializer: Materializer<S>,
    verifier: V,
    config: RunnerConfig,
}

impl<S: ObjectStore + ?Sized, V: Verifier> JobRunner<S, V> {
    /// Create a new JobRunner.
    pub fn new(materializer: Materializer<S>, verifier: V, config: RunnerConfig) -> Self {
        Self {
            materializer,
            verifier,
            config,
        }
    }

    /// Run one job to a response.
    ///
    /// A non-zero verifier exit yields a 500 response carrying the verifier
    /// output; any stage failure yields a 500 response carrying the error.
    pub async fn run(&self, request: &JobRequest) -> JobResponse {
        let prefix = request.prefix.as_str();
        info!(prefix = %prefix, "Starting job");

        match self.execute(prefix).await {
            Ok(output) => {
                if output.succeeded() {
                    info!(prefix = %prefix, "Verification passed");
                } else {
                    info!(
                        prefix = %prefix,
                        exit_code = ?output.exit_code,
                        "Verification failed"
                    );
                }
                package_output(prefix, output)
            }
            Err(err) => {
                error!(
                    prefix = %prefix,
                    error_kind = %err.kind(),
                    offending = ?err.offending(),
                    error = %err,
                    "Job aborted"
                );
                package_failure(prefix, &err)
            }
        }
    }

    /// Parse a raw JSON request and run it.
    ///
    /// Unparseable requests are answered with a 500 response without
    /// touching the workspace.
    pub async fn run_raw(&self, input: &str) -> JobResponse {
        match parse_job_request(input) {
            Ok(request) => self.run(&request).await,
            Err(err) => {
                error!(error_kind = %err.kind(), error = %err, "Rejected job request");
                package_failure("", &err)
            }
        }
    }

    /// Run a raw request that has not been decoded yet.
    ///
    /// Input that is not valid UTF-8 is answered like any other
    /// unparseable request.
    pub async fn run_bytes(&self, input: &[u8]) -> JobResponse {
        match std::str::from_utf8(input) {
            Ok(input) => self.run_raw(input).await,
            Err(e) => {
                let err = TcError::Config(format!("Request is not valid UTF-8: {e}"));
                error!(error_kind = %err.kind(), error = %err, "Rejected job request");
                package_failure("", &err)
            }
        }
    }

    async fn execute(&self, prefix: &str) -> Result<VerificationOutput> {
        if prefix.is_empty() {
            return Err(TcError::Config(
                "Empty prefix would materialize the whole bucket".to_string(),
            ));
        }

        let root = &self.materializer.config().workspace_root;

        let entry_file = entry_path(root, prefix, &self.config.entry_file)
            .map_err(|e| TcError::Config(format!("Invalid entry file for '{prefix}': {e}")))?;

        let include_root: PathBuf = match self.config.include_root {
            IncludeRoot::Workspace => root.clone(),
            IncludeRoot::Project => local_path(root, prefix)
                .map_err(|e| TcError::Config(format!("Invalid prefix '{prefix}': {e}")))?,
        };

        self.materializer.run(prefix).await?;

        self.verifier.verify(&include_root, &entry_file).await
    }
}
