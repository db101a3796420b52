//! Verifier invocation interface.

use async_trait::async_trait;
use std::path::Path;
use tc_error::Result;
use tc_types::VerificationOutput;

/// An external batch checker.
///
/// A non-zero exit code is a normal negative result and is returned as
/// `Ok`; `Err` is reserved for failures to run the checker at all
/// (missing binary, spawn failure, deadline exceeded).
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Runs the checker on `entry_file` with `include_root` on its include path.
    async fn verify(&self, include_root: &Path, entry_file: &Path) -> Result<VerificationOutput>;
}

#[async_trait]
impl<V: Verifier + ?Sized> Verifier for std::sync::Arc<V> {
    async fn verify(&self, include_root: &Path, entry_file: &Path) -> Result<VerificationOutput> {
        self.as_ref().verify(include_root, entry_file).await
    }
}
