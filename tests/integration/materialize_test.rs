//! Materialization tests against LocalStack S3.

use crate::common::{LocalStackTestContext, SAMPLE_PROJECT};
use std::sync::Arc;
use tc_error::ErrorKind;
use tc_materializer::{
    MaterializeConfig, Materializer, S3Config, S3Store, collect_keys, create_s3_client,
};
use tempfile::TempDir;

async fn s3_store(ctx: &LocalStackTestContext) -> Arc<S3Store> {
    let s3_config = S3Config::new()
        .with_region(&ctx.region)
        .with_endpoint(&ctx.endpoint)
        .with_credentials("test", "test");
    Arc::new(S3Store::new(create_s3_client(&s3_config).await.unwrap()))
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_materialize_project_from_s3() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "tc-materialize-bucket";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.put_tree(bucket, SAMPLE_PROJECT).await.unwrap();
    ctx.put(bucket, "proj2/main.agda", b"module main where\n")
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let root = dir.path().join("ws");
    let materializer = Materializer::new(
        s3_store(&ctx).await,
        MaterializeConfig::new(bucket, &root),
    );

    let stats = materializer.run("proj1/").await.unwrap();

    assert_eq!(stats.directories_created, 2);
    assert_eq!(stats.files_downloaded, 2);
    assert!(root.join("proj1/lib").is_dir());
    assert_eq!(
        std::fs::read_to_string(root.join("proj1/main.agda")).unwrap(),
        "module main where\n\nopen import lib.helper\n"
    );
    assert!(!root.join("proj2").exists());
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_listing_follows_pagination() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    // S3 returns at most 1000 keys per page
    let bucket = "tc-pagination-bucket";
    ctx.create_bucket(bucket).await.unwrap();
    for i in 0..1005 {
        ctx.put(bucket, &format!("big/m{i:04}.agda"), b"module m where\n")
            .await
            .unwrap();
    }

    let store = s3_store(&ctx).await;
    let keys = collect_keys(store.as_ref(), bucket, "big/").await.unwrap();

    assert_eq!(keys.len(), 1005);
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_missing_bucket_is_listing_failure() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let dir = TempDir::new().unwrap();
    let bucket = "tc-bucket-that-does-not-exist";
    let materializer = Materializer::new(
        s3_store(&ctx).await,
        MaterializeConfig::new(bucket, dir.path().join("ws")),
    );

    let err = materializer.run("proj1/").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ListingFailed);
}
