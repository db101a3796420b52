//! Main execution logic for tc-check.

use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tc_materializer::{MaterializeConfig, Materializer, S3Config, S3Store, create_s3_client};
use tc_runner::{CommandVerifier, JobRunner, RunnerConfig, VerifierConfig};
use tc_traits::{ObjectStore, Verifier};
use tc_types::{JobRequest, JobResponse};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::args::Cli;

/// Outcome counts over every job answered in one invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Jobs answered
    pub jobs: usize,
    /// Jobs whose verifier exited successfully
    pub passed: usize,
    /// Jobs whose verifier ran and reported failure
    pub rejected: usize,
    /// Jobs aborted by an internal failure
    pub aborted: usize,
}

impl RunSummary {
    /// Record one response.
    pub fn record(&mut self, response: &JobResponse) {
        self.jobs += 1;
        if response.is_ok() {
            self.passed += 1;
        } else if response.error.is_some() {
            self.aborted += 1;
        } else {
            self.rejected += 1;
        }
    }

    /// Whether every job passed.
    pub fn all_passed(&self) -> bool {
        self.passed == self.jobs
    }
}

/// Execute tc-check with the provided arguments.
pub async fn execute(args: Cli) -> Result<RunSummary> {
    let runner = build_runner(&args).await?;
    let mut out = std::io::stdout();

    match &args.prefix {
        Some(prefix) => {
            let mut summary = RunSummary::default();
            let response = runner.run(&JobRequest::new(prefix)).await;
            emit(&mut out, &response)?;
            summary.record(&response);
            Ok(summary)
        }
        None => {
            debug!("Reading job requests from stdin");
            answer_lines(&runner, BufReader::new(tokio::io::stdin()), &mut out).await
        }
    }
}

/// Answer every non-blank line of `input` with one JSON response line.
///
/// Lines are read as raw bytes so an undecodable line gets its own failure
/// response instead of ending the stream.
async fn answer_lines<S, V, R, W>(
    runner: &JobRunner<S, V>,
    input: R,
    out: &mut W,
) -> Result<RunSummary>
where
    S: ObjectStore + ?Sized,
    V: Verifier,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut summary = RunSummary::default();
    let mut lines = input.split(b'\n');

    while let Some(line) = lines.next_segment().await? {
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let response = runner.run_bytes(line).await;
        emit(out, &response)?;
        summary.record(&response);
    }

    Ok(summary)
}

/// Build the job runner from CLI arguments.
///
/// One S3 client is created here and shared by every job.
async fn build_runner(args: &Cli) -> Result<JobRunner<S3Store, CommandVerifier>> {
    let mut s3_config = S3Config::new()
        .with_region(&args.region)
        .with_timeout(args.s3_timeout_secs);

    if let Some(endpoint) = &args.s3_endpoint {
        s3_config = s3_config.with_endpoint(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&args.access_key, &args.secret_key) {
        s3_config = s3_config.with_credentials(access_key, secret_key);
    }

    if let Some(profile) = &args.profile {
        s3_config = s3_config.with_profile(profile);
    }

    let store = Arc::new(S3Store::new(create_s3_client(&s3_config).await?));

    let materializer = Materializer::new(
        store,
        MaterializeConfig::new(&args.bucket, &args.workspace).with_concurrency(args.concurrency),
    );

    let mut verifier_config =
        VerifierConfig::new(&args.verifier).with_include_flag(&args.include_flag);
    for arg in &args.verifier_args {
        verifier_config = verifier_config.with_arg(arg);
    }
    if args.timeout_secs > 0 {
        verifier_config =
            verifier_config.with_timeout(std::time::Duration::from_secs(args.timeout_secs));
    }

    let runner_config = RunnerConfig::new()
        .with_entry_file(&args.entry_file)
        .with_include_root(args.include_root.into());

    Ok(JobRunner::new(
        materializer,
        CommandVerifier::new(verifier_config),
        runner_config,
    ))
}

/// Write one response as a JSON line.
fn emit<W: Write>(out: &mut W, response: &JobResponse) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(response)?)?;
    out.flush()?;
    Ok(())
}
