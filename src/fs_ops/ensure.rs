//! Path resolution that guarantees the parent directory exists.
//! - Absolute form is computed lexically (no symlink resolution, path need not exist).
//! - Missing ancestors are created with the requested mode (subject to umask, Unix only).

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::FsError;

/// Resolve `path` to an absolute path and make sure its parent directory exists.
/// Returns the absolute path; the path itself is neither created nor checked.
pub fn ensure_path(path: impl AsRef<Path>, dir_mode: u32) -> Result<PathBuf, FsError> {
    let path = path.as_ref();
    let abs = absolutize(path)?;

    let Some(parent) = abs.parent() else {
        // Filesystem root: nothing above it to create.
        return Ok(abs);
    };

    match fs::metadata(parent) {
        Ok(_) => trace!(parent = %parent.display(), "parent directory present"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            create_dir_chain(parent, dir_mode)?;
            debug!(parent = %parent.display(), mode = format!("{:o}", dir_mode), "created parent directories");
        }
        Err(source) => {
            return Err(FsError::Stat {
                path: parent.to_path_buf(),
                source,
            });
        }
    }
    Ok(abs)
}

/// Absolute, lexically cleaned form of `path`.
pub fn absolutize(path: &Path) -> Result<PathBuf, FsError> {
    let abs = std::path::absolute(path).map_err(|source| FsError::Resolution {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(clean(&abs))
}

/// Collapse `.` and `..` components without touching the filesystem.
/// `..` at the root stays at the root.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn create_dir_chain(dir: &Path, mode: u32) -> Result<(), FsError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(dir).map_err(|source| FsError::DirCreate {
        path: dir.to_path_buf(),
        source,
    })
}
