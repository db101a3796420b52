//! Workspace reset.

use std::io::ErrorKind;
use std::path::Path;
use tc_error::{Result, TcError};
use tracing::debug;

/// Remove `root` and everything beneath it.
///
/// Succeeds if `root` does not exist. Any other failure (permissions, `root`
/// being a regular file) is a [`TcError::Reset`].
pub async fn reset_workspace(root: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(root).await {
        Ok(()) => {
            debug!(path = %root.display(), "Workspace cleared");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %root.display(), "Workspace absent, nothing to clear");
            Ok(())
        }
        Err(source) => Err(TcError::Reset {
            path: root.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_error::ErrorKind as TcErrorKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reset_removes_tree() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("ws");
        std::fs::create_dir_all(root.join("proj1/lib")).unwrap();
        std::fs::write(root.join("proj1/lib/helper.agda"), "module helper where").unwrap();

        reset_workspace(&root).await.unwrap();

        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_reset_missing_workspace_is_ok() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("never-created");

        reset_workspace(&root).await.unwrap();
        reset_workspace(&root).await.unwrap();

        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_reset_regular_file_fails() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("ws");
        std::fs::write(&root, "not a directory").unwrap();

        let err = reset_workspace(&root).await.unwrap_err();

        assert_eq!(err.kind(), TcErrorKind::ResetFailed);
        assert!(root.exists());
    }
}
