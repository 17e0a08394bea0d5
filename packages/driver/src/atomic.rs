//! Two-phase file replacement.
//!
//! New content goes to a sibling `<name>.tmp` file which is flushed to disk and
//! then renamed over the final path. Rename is atomic on POSIX, so a reader
//! sees either the old file or the new one. If the process dies before the
//! rename, the final file is untouched and the staging file is overwritten by
//! the next attempt.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const STAGING_SUFFIX: &str = ".tmp";

#[cfg(unix)]
const FILE_MODE: u32 = 0o664;

/// `<final_path>.tmp`
pub(crate) fn staging_path(final_path: &Path) -> PathBuf {
    let mut name = OsString::from(final_path.as_os_str());
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

/// Replaces `final_path` with `contents`, never exposing a partial file.
pub(crate) fn replace(final_path: &Path, contents: &[u8]) -> Result<()> {
    let staging = staging_path(final_path);

    let result = stage(&staging, contents).and_then(|()| commit(&staging, final_path));
    if result.is_err() {
        discard(&staging);
    }
    result
}

/// Writes and syncs the staging file. The final file is not touched.
pub(crate) fn stage(staging: &Path, contents: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(staging).map_err(Error::io(staging))?;
    file.write_all(contents).map_err(Error::io(staging))?;
    file.sync_all().map_err(Error::io(staging))?;
    Ok(())
}

/// Moves the staging file over the final path and syncs the parent directory.
///
/// Once the rename has happened the new content is in place, so a failed
/// directory sync is logged rather than returned.
pub(crate) fn commit(staging: &Path, final_path: &Path) -> Result<()> {
    fs::rename(staging, final_path).map_err(Error::io(final_path))?;
    if let Err(error) = sync_parent(final_path) {
        log::warn!(
            "Failed to sync directory of {}: {}",
            final_path.display(),
            error
        );
    }
    Ok(())
}

#[cfg(unix)]
fn sync_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::File::open(parent)?.sync_all()?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn discard(staging: &Path) {
    match fs::remove_file(staging) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => log::warn!(
            "Failed to remove staging file {}: {}",
            staging.display(),
            error
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_path_appends_suffix() {
        assert_eq!(
            staging_path(Path::new("db/users/alice.json")),
            PathBuf::from("db/users/alice.json.tmp")
        );
    }

    #[test]
    fn replace_writes_new_file_and_removes_staging() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("alice.json");

        replace(&target, b"{\"a\": 1}\n").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"{\"a\": 1}\n");
        assert!(!staging_path(&target).exists());
    }

    #[test]
    fn replace_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("alice.json");
        fs::write(&target, "a much longer original body that must not leak through").unwrap();

        replace(&target, b"short").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"short");
    }

    #[test]
    fn commit_moves_staging_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("alice.json");
        fs::write(&target, "old").unwrap();
        let staging = staging_path(&target);
        stage(&staging, b"new").unwrap();

        commit(&staging, &target).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new");
        assert!(!staging.exists());
    }

    #[test]
    fn interrupted_before_commit_leaves_final_file_intact() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("alice.json");
        fs::write(&target, "old").unwrap();

        // Simulate a crash between stage and commit.
        stage(&staging_path(&target), b"new").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"old");

        // The next attempt reuses the leftover staging file.
        replace(&target, b"newer").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"newer");
        assert!(!staging_path(&target).exists());
    }

    #[test]
    fn failed_stage_leaves_final_file_intact() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("alice.json");
        fs::write(&target, "old").unwrap();
        // A directory in the staging slot makes the open fail.
        fs::create_dir(staging_path(&target)).unwrap();

        let err = replace(&target, b"new").unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(fs::read(&target).unwrap(), b"old");
    }

    #[cfg(unix)]
    #[test]
    fn staged_file_mode_is_owner_and_group_writable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("alice.json");
        replace(&target, b"{}").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o600, 0o600);
        assert_eq!(mode & 0o111, 0);
    }
}
