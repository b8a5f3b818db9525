//! Atomic rename-replace of a staged temp file onto its destination.
//! - The temp file lives in the destination directory, so the rename never crosses filesystems.
//! - Replaces an existing destination in one step (rename(2) on Unix, MoveFileEx with
//!   MOVEFILE_REPLACE_EXISTING on Windows).
//! - With `Durability::Full`, best-effort fsync of the destination directory after the rename.

use std::path::Path;
use tempfile::{PathPersistError, TempPath};
use tracing::{debug, trace};

use super::io_copy::Durability;
use super::util::{discard, fsync_dir, split_destination};
use crate::errors::FsError;

pub(super) fn replace_destination(
    tmp: TempPath,
    dest: &Path,
    mode: Durability,
) -> Result<(), FsError> {
    let from = tmp.to_path_buf();
    if let Err(PathPersistError { error, path }) = tmp.persist(dest) {
        return Err(discard(
            path,
            FsError::Rename {
                from,
                to: dest.to_path_buf(),
                source: error,
            },
        ));
    }
    debug!(tmp = %from.display(), dest = %dest.display(), "renamed into place");

    if mode == Durability::Full
        && let Ok((dir, _)) = split_destination(dest)
    {
        // The rename already happened; a failed directory fsync must not turn it into an error.
        if let Err(e) = fsync_dir(dir) {
            trace!(dir = %dir.display(), error = %e, "directory fsync failed");
        }
    }
    Ok(())
}
