use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::Path;
use tempfile::{Builder, NamedTempFile, TempPath};
use tracing::{trace, warn};

use crate::errors::FsError;

/// Suffix shared by every temp artifact the copier creates.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Split a destination into (directory, file name).
/// A bare file name lives in the current directory.
pub(super) fn split_destination(dest: &Path) -> Result<(&Path, &OsStr), FsError> {
    let name = dest.file_name().ok_or_else(|| FsError::InvalidDestination {
        path: dest.to_path_buf(),
    })?;
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Ok((dir, name))
}

/// Longest file name most filesystems accept, in bytes.
const NAME_MAX: usize = 255;
/// Random characters tempfile inserts between prefix and suffix.
const RANDOM_LEN: usize = 6;
/// Room left for the destination name: `.` + name + `.` + random + suffix.
const PREFIX_NAME_MAX: usize = NAME_MAX - 2 - RANDOM_LEN - TEMP_SUFFIX.len();

/// `.<dest_name>.`, with the name cut at a char boundary so the full temp
/// name stays within NAME_MAX.
fn temp_prefix(dest_name: &OsStr) -> String {
    let name = dest_name.to_string_lossy();
    let mut end = name.len().min(PREFIX_NAME_MAX);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    format!(".{}.", &name[..end])
}

/// Create `.<dest_name>.<random>.tmp` inside `dir` with O_EXCL semantics.
pub(super) fn temp_file_in(dir: &Path, dest_name: &OsStr) -> io::Result<NamedTempFile> {
    let prefix = temp_prefix(dest_name);
    Builder::new()
        .prefix(&prefix)
        .rand_bytes(RANDOM_LEN)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
}

/// True if `candidate` looks like a temp artifact staged for `dest`.
/// Useful for sweeping leftovers after a crash (no cleanup runs on SIGKILL).
pub fn is_temp_artifact(dest: &Path, candidate: &Path) -> bool {
    let (Ok((dest_dir, dest_name)), Ok((dir, name))) =
        (split_destination(dest), split_destination(candidate))
    else {
        return false;
    };
    if dest_dir != dir {
        return false;
    }
    let prefix = temp_prefix(dest_name);
    let Some(name) = name.to_str() else {
        return false;
    };
    name.len() > prefix.len() + TEMP_SUFFIX.len()
        && name.starts_with(&prefix)
        && name.ends_with(TEMP_SUFFIX)
}

/// Remove a temp file that will not be renamed into place, then hand back `err`.
/// A failed removal is logged and never replaces the original error.
pub(super) fn discard(tmp: TempPath, err: FsError) -> FsError {
    let path = tmp.to_path_buf();
    match tmp.close() {
        Ok(()) => trace!(tmp = %path.display(), "removed temporary file"),
        Err(e) => warn!(
            tmp = %path.display(),
            error = %e,
            cause = %err,
            "failed to remove temporary file after error"
        ),
    }
    err
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}

#[cfg(not(unix))]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
