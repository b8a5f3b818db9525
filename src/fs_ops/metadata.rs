//! Metadata replication onto the staged temp file.
//! - Permission bits (Unix mode incl. setuid/setgid/sticky; readonly attribute elsewhere): fatal on failure.
//! - Timestamps (atime, mtime): opt-in and best-effort; failures are logged and ignored.

use filetime::{set_file_times, FileTime};
#[cfg(not(unix))]
use filetime::{set_file_atime, set_file_mtime};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

use crate::errors::FsError;

/// Permission bits of `meta` as they will be applied.
#[cfg(unix)]
pub fn permission_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

/// Apply the source's permissions to `dest`.
pub fn apply_permissions(dest: &Path, src_meta: &fs::Metadata) -> Result<(), FsError> {
    #[cfg(unix)]
    let perms = {
        use std::os::unix::fs::PermissionsExt;
        fs::Permissions::from_mode(permission_bits(src_meta))
    };
    #[cfg(not(unix))]
    let perms = src_meta.permissions();

    fs::set_permissions(dest, perms).map_err(|source| FsError::Chmod {
        path: dest.to_path_buf(),
        source,
    })?;

    #[cfg(unix)]
    trace!(path = %dest.display(), mode = format!("{:o}", permission_bits(src_meta)), "set permissions");
    #[cfg(not(unix))]
    trace!(path = %dest.display(), readonly = src_meta.permissions().readonly(), "set readonly attribute");
    Ok(())
}

/// chown(2) clears setuid/setgid on regular files; put the source's bits back.
#[cfg(unix)]
pub fn restore_setid_bits(dest: &Path, src_meta: &fs::Metadata) -> Result<(), FsError> {
    if permission_bits(src_meta) & 0o6000 == 0 {
        return Ok(());
    }
    apply_permissions(dest, src_meta)
}

#[cfg(not(unix))]
pub fn restore_setid_bits(_dest: &Path, _src_meta: &fs::Metadata) -> Result<(), FsError> {
    Ok(())
}

/// Copy access and modification times from `src_meta` onto `dest` (best-effort).
pub fn apply_times(dest: &Path, src_meta: &fs::Metadata) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let mt = FileTime::from_unix_time(src_meta.mtime(), src_meta.mtime_nsec() as u32);
        let at = FileTime::from_unix_time(src_meta.atime(), src_meta.atime_nsec() as u32);
        if let Err(e) = set_file_times(dest, at, mt) {
            warn!(path = %dest.display(), error = %e, "failed to set atime/mtime");
        } else {
            trace!(path = %dest.display(), "set atime/mtime");
        }
    }
    #[cfg(not(unix))]
    {
        let at = src_meta.accessed().ok().map(FileTime::from_system_time);
        let mt = src_meta.modified().ok().map(FileTime::from_system_time);
        let res = match (at, mt) {
            (Some(a), Some(m)) => set_file_times(dest, a, m),
            (Some(a), None) => set_file_atime(dest, a),
            (None, Some(m)) => set_file_mtime(dest, m),
            (None, None) => return,
        };
        if let Err(e) = res {
            warn!(path = %dest.display(), error = %e, "failed to set file times");
        } else {
            trace!(path = %dest.display(), "set file times");
        }
    }
}
