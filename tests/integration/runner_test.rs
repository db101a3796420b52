//! End-to-end job tests against LocalStack S3 with a scripted verifier.

use crate::common::{LocalStackTestContext, SAMPLE_PROJECT};
use std::sync::Arc;
use tc_materializer::{MaterializeConfig, Materializer, S3Config, S3Store, create_s3_client};
use tc_runner::{CommandVerifier, JobRunner, RunnerConfig, VerifierConfig};
use tc_types::JobRequest;
use tempfile::TempDir;

/// Run one job for `prefix` with a verifier script exiting `exit_code`.
async fn run_job(
    ctx: &LocalStackTestContext,
    bucket: &str,
    prefix: &str,
    exit_code: i32,
) -> (u16, String) {
    let s3_config = S3Config::new()
        .with_region(&ctx.region)
        .with_endpoint(&ctx.endpoint)
        .with_credentials("test", "test");
    let store = Arc::new(S3Store::new(create_s3_client(&s3_config).await.unwrap()));

    let dir = TempDir::new().unwrap();
    let script = dir.path().join("verifier.sh");
    std::fs::write(&script, format!("cat \"$3\"\nexit {exit_code}\n")).unwrap();

    let runner = JobRunner::new(
        Materializer::new(store, MaterializeConfig::new(bucket, dir.path().join("ws"))),
        CommandVerifier::new(VerifierConfig::new("sh").with_arg(script.to_string_lossy())),
        RunnerConfig::default(),
    );

    let response = runner.run(&JobRequest::new(prefix)).await;
    let stdout = response.result.map(|r| r.stdout).unwrap_or_default();
    (response.status_code, stdout)
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_job_passes_when_verifier_succeeds() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "tc-runner-bucket";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.put_tree(bucket, SAMPLE_PROJECT).await.unwrap();

    let (status, stdout) = run_job(&ctx, bucket, "proj1/", 0).await;

    assert_eq!(status, 200);
    assert!(stdout.contains("open import lib.helper"));
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_job_fails_when_verifier_rejects() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "tc-runner-bucket";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.put_tree(bucket, SAMPLE_PROJECT).await.unwrap();

    let (status, _) = run_job(&ctx, bucket, "proj1/", 1).await;

    assert_eq!(status, 500);
}
