//! Atomic file copy:
//! - Stats and opens the source
//! - Streams it into a uniquely named temp file in the destination directory
//! - Closes the temp file, then replicates permissions and (where supported) owner/group
//! - Atomically renames temp -> dest
//!
//! On any failure the destination is untouched and the temp file is removed.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::debug;

use super::atomic::replace_destination;
use super::io_copy::{self, Durability};
use super::metadata::{apply_permissions, apply_times, restore_setid_bits};
use super::ownership::{apply_owner, owner_of};
use super::util::{discard, split_destination, temp_file_in};
use crate::errors::FsError;

/// Per-call tuning. `Default` gives the plain [`copy_file`] behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    pub durability: Durability,
    /// Also replicate access/modification times (best-effort).
    pub preserve_times: bool,
}

/// What a successful copy did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub dest: PathBuf,
    pub bytes: u64,
    /// True when owner/group were applied (POSIX platforms only).
    pub ownership_applied: bool,
}

/// Atomically replace `dest` with a copy of `src`, including permission bits
/// and, on POSIX systems, owner and group.
pub fn copy_file(dest: impl AsRef<Path>, src: impl AsRef<Path>) -> Result<(), FsError> {
    copy_file_with(dest, src, &CopyOptions::default()).map(|_| ())
}

/// [`copy_file`] with explicit options; returns a [`CopyReport`].
pub fn copy_file_with(
    dest: impl AsRef<Path>,
    src: impl AsRef<Path>,
    opts: &CopyOptions,
) -> Result<CopyReport, FsError> {
    let (dest, src) = (dest.as_ref(), src.as_ref());

    let src_meta = fs::metadata(src).map_err(|e| FsError::source_stat(src, e))?;
    let src_file = File::open(src).map_err(|source| FsError::SourceOpen {
        path: src.to_path_buf(),
        source,
    })?;

    let (dir, name) = split_destination(dest)?;
    let mut staged = temp_file_in(dir, name).map_err(|source| FsError::TempCreate {
        dir: dir.to_path_buf(),
        source,
    })?;
    let tmp_path = staged.path().to_path_buf();
    debug!(src = %src.display(), tmp = %tmp_path.display(), "staging copy");

    // From here on every early return goes through `discard`.
    let bytes = match io_copy::stream(src_file, staged.as_file_mut()) {
        Ok(n) => n,
        Err(source) => {
            let err = FsError::Copy {
                src: src.to_path_buf(),
                tmp: tmp_path,
                source,
            };
            return Err(discard(staged.into_temp_path(), err));
        }
    };
    if let Err(source) = io_copy::finish(staged.as_file(), opts.durability) {
        let err = FsError::Close { tmp: tmp_path, source };
        return Err(discard(staged.into_temp_path(), err));
    }
    // Drops the handle; permission changes below operate on a closed file.
    let tmp = staged.into_temp_path();
    debug!(tmp = %tmp_path.display(), bytes, "temp file written and closed");

    let (tmp, ownership_applied) = stage_metadata(tmp, &src_meta, opts)?;
    replace_destination(tmp, dest, opts.durability)?;
    debug!(src = %src.display(), dest = %dest.display(), bytes, "copy complete");

    Ok(CopyReport {
        dest: dest.to_path_buf(),
        bytes,
        ownership_applied,
    })
}

/// Replicate the source's mode, owner and (optionally) times onto the closed
/// temp file. Any failure removes the temp file.
fn stage_metadata(
    tmp: TempPath,
    src_meta: &fs::Metadata,
    opts: &CopyOptions,
) -> Result<(TempPath, bool), FsError> {
    if let Err(err) = apply_permissions(&tmp, src_meta) {
        return Err(discard(tmp, err));
    }
    let ownership_applied = match owner_of(src_meta) {
        Some(owner) => {
            let res = apply_owner(&tmp, owner).and_then(|()| restore_setid_bits(&tmp, src_meta));
            if let Err(err) = res {
                return Err(discard(tmp, err));
            }
            true
        }
        None => false,
    };
    if opts.preserve_times {
        apply_times(&tmp, src_meta);
    }
    Ok((tmp, ownership_applied))
}
