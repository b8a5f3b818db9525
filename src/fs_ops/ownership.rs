//! POSIX ownership as a capability.
//! Callers ask whether the source carries owner/group metadata; where the
//! platform has no such concept the answer is `None` and the step is skipped.

use std::fs;
use std::path::Path;

use crate::errors::FsError;

/// Numeric owner and group identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub uid: u32,
    pub gid: u32,
}

/// Owner/group of `meta`, or `None` when the platform lacks the concept.
#[cfg(unix)]
pub fn owner_of(meta: &fs::Metadata) -> Option<Owner> {
    use std::os::unix::fs::MetadataExt;
    Some(Owner {
        uid: meta.uid(),
        gid: meta.gid(),
    })
}

#[cfg(not(unix))]
pub fn owner_of(_meta: &fs::Metadata) -> Option<Owner> {
    None
}

/// chown(2) `path` to `owner`.
#[cfg(unix)]
pub fn apply_owner(path: &Path, owner: Owner) -> Result<(), FsError> {
    std::os::unix::fs::chown(path, Some(owner.uid), Some(owner.gid)).map_err(|source| {
        FsError::Chown {
            path: path.to_path_buf(),
            uid: owner.uid,
            gid: owner.gid,
            source,
        }
    })
}

#[cfg(not(unix))]
pub fn apply_owner(_path: &Path, _owner: Owner) -> Result<(), FsError> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn owner_matches_current_process_for_new_files() {
        let f = NamedTempFile::new().unwrap();
        let meta = fs::metadata(f.path()).unwrap();
        let owner = owner_of(&meta).unwrap();
        assert_eq!(owner.uid, unsafe { libc::geteuid() });
    }

    #[test]
    fn reapplying_own_owner_succeeds() {
        let f = NamedTempFile::new().unwrap();
        let owner = owner_of(&fs::metadata(f.path()).unwrap()).unwrap();
        apply_owner(f.path(), owner).unwrap();
    }

    #[test]
    fn chown_missing_path_reports_ids() {
        let err = apply_owner(Path::new("/definitely/not/here"), Owner { uid: 1, gid: 2 })
            .unwrap_err();
        match err {
            FsError::Chown { uid, gid, .. } => assert_eq!((uid, gid), (1, 2)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
