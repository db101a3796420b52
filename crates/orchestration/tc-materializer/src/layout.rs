//! Mapping from remote keys onto local paths.
//!
//! The full key, prefix included, is preserved as a relative path under the
//! workspace root, so `proj1/lib/helper.agda` under root `/tmp/ws` lands at
//! `/tmp/ws/proj1/lib/helper.agda`.

use std::path::{Path, PathBuf};
use tc_error::{StoreError, StoreResult};

use crate::classify::KEY_SEPARATOR;

/// Compute the local path for `key` under `root`.
///
/// Empty segments collapse (`a//b` maps like `a/b`). Keys with `.` or `..`
/// segments are rejected so nothing is ever written outside `root`.
pub fn local_path(root: &Path, key: &str) -> StoreResult<PathBuf> {
    let mut path = root.to_path_buf();

    for segment in key.split(KEY_SEPARATOR) {
        match segment {
            "" => continue,
            "." | ".." => {
                return Err(StoreError::InvalidKey(format!(
                    "'{key}' contains a '{segment}' segment"
                )));
            }
            segment => path.push(segment),
        }
    }

    Ok(path)
}

/// Join a prefix and a prefix-relative path into a full key.
pub fn project_key(prefix: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches(KEY_SEPARATOR);
    if prefix.is_empty() || prefix.ends_with(KEY_SEPARATOR) {
        format!("{prefix}{relative}")
    } else {
        format!("{prefix}{KEY_SEPARATOR}{relative}")
    }
}

/// Local path of the entry file of the project stored under `prefix`.
pub fn entry_path(root: &Path, prefix: &str, entry_file: &str) -> StoreResult<PathBuf> {
    local_path(root, &project_key(prefix, entry_file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_path_preserves_prefix() {
        let root = Path::new("/tmp/ws");

        assert_eq!(
            local_path(root, "proj1/lib/helper.agda").unwrap(),
            PathBuf::from("/tmp/ws/proj1/lib/helper.agda")
        );
        assert_eq!(
            local_path(root, "proj1/lib/").unwrap(),
            PathBuf::from("/tmp/ws/proj1/lib")
        );
    }

    #[test]
    fn test_local_path_collapses_empty_segments() {
        let root = Path::new("/tmp/ws");

        assert_eq!(
            local_path(root, "/proj1//main.agda").unwrap(),
            PathBuf::from("/tmp/ws/proj1/main.agda")
        );
        assert_eq!(local_path(root, "/").unwrap(), PathBuf::from("/tmp/ws"));
    }

    #[test]
    fn test_local_path_rejects_traversal() {
        let root = Path::new("/tmp/ws");

        assert!(matches!(
            local_path(root, "proj1/../../etc/passwd"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            local_path(root, "proj1/./main.agda"),
            Err(StoreError::InvalidKey(_))
        ));
        // Dots inside a segment are ordinary file names
        assert!(local_path(root, "proj1/..hidden").is_ok());
    }

    #[test]
    fn test_project_key() {
        assert_eq!(project_key("proj1/", "main.agda"), "proj1/main.agda");
        assert_eq!(project_key("proj1", "main.agda"), "proj1/main.agda");
        assert_eq!(project_key("proj1/", "/main.agda"), "proj1/main.agda");
        assert_eq!(project_key("", "main.agda"), "main.agda");
    }

    #[test]
    fn test_entry_path() {
        assert_eq!(
            entry_path(Path::new("/tmp/ws"), "proj1/", "main.agda").unwrap(),
            PathBuf::from("/tmp/ws/proj1/main.agda")
        );
    }
}
