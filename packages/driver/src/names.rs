//! Mapping of collection and resource names onto the directory tree.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix of every committed resource file.
pub const RESOURCE_EXTENSION: &str = "json";

/// Rejects names that are empty or that would step outside their parent directory.
pub(crate) fn validate(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument(format!(
            "{} name must not be empty",
            kind
        )));
    }

    if name == "." || name == ".." {
        return Err(Error::invalid_argument(format!(
            "{} name ({:?}) must not be a relative directory reference",
            kind, name
        )));
    }

    if name.contains(['/', '\\', '\0']) {
        return Err(Error::invalid_argument(format!(
            "{} name ({:?}) must not contain path separators or NUL",
            kind, name
        )));
    }

    Ok(())
}

/// `<collection_dir>/<resource>.json`
pub(crate) fn resource_file(collection_dir: &Path, resource: &str) -> PathBuf {
    collection_dir.join(format!("{}.{}", resource, RESOURCE_EXTENSION))
}

/// Finds the file backing `resource`.
///
/// The exact name is tried first, then the name with the `.json` suffix, so
/// callers may pass either `alice` or `alice.json`.
pub(crate) fn resolve(collection_dir: &Path, resource: &str) -> Option<PathBuf> {
    let exact = collection_dir.join(resource);
    if exact.exists() {
        return Some(exact);
    }

    let suffixed = resource_file(collection_dir, resource);
    if suffixed.exists() {
        return Some(suffixed);
    }

    None
}

/// True for committed resource files, false for staging artifacts and anything else.
pub(crate) fn is_resource_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == RESOURCE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn validate_rejects_empty() {
        let err = validate("collection", "").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(format!("{}", err).contains("collection name must not be empty"));
    }

    #[test]
    fn validate_rejects_escaping_names() {
        for name in [".", "..", "a/b", "a\\b", "nul\0byte", "/abs"] {
            assert!(
                validate("resource", name).unwrap_err().is_invalid_argument(),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn validate_accepts_plain_names() {
        for name in ["users", "alice", "alice.json", "with space", "ünïcode", ".hidden"] {
            validate("resource", name).unwrap();
        }
    }

    #[test]
    fn resolve_prefers_exact_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("alice"), "{}").unwrap();
        fs::write(dir.path().join("alice.json"), "{}").unwrap();

        assert_eq!(resolve(dir.path(), "alice"), Some(dir.path().join("alice")));
    }

    #[test]
    fn resolve_falls_back_to_suffixed_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("alice.json"), "{}").unwrap();

        assert_eq!(
            resolve(dir.path(), "alice"),
            Some(dir.path().join("alice.json"))
        );
        assert_eq!(
            resolve(dir.path(), "alice.json"),
            Some(dir.path().join("alice.json"))
        );
    }

    #[test]
    fn resolve_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve(dir.path(), "bob"), None);
    }

    #[test]
    fn staging_files_are_not_resources() {
        assert!(is_resource_file(Path::new("users/alice.json")));
        assert!(!is_resource_file(Path::new("users/alice.json.tmp")));
        assert!(!is_resource_file(Path::new("users/alice")));
    }
}
