//! Regular-file existence check that separates "absent" from "could not tell".

use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

use crate::errors::FsError;

/// `Ok(true)` only for an existing regular file (symlinks are followed).
/// Absent paths and directories give `Ok(false)`; any other stat failure is an error.
pub fn file_exists(path: impl AsRef<Path>) -> Result<bool, FsError> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(meta) => {
            trace!(path = %path.display(), is_file = meta.is_file(), "stat ok");
            Ok(meta.is_file())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(FsError::Stat {
            path: path.to_path_buf(),
            source,
        }),
    }
}
