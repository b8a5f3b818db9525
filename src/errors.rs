//! Typed error definitions for atomic_fs.
//! One variant per failing step, so callers can tell structural failures
//! (missing source, bad destination) from transient ones (write, rename).

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("source not found: {}", .path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot stat source '{}': {source}", .path.display())]
    SourceUnreadable { path: PathBuf, source: io::Error },

    #[error("cannot open source '{}': {source}", .path.display())]
    SourceOpen { path: PathBuf, source: io::Error },

    #[error("destination has no file name: {}", .path.display())]
    InvalidDestination { path: PathBuf },

    #[error("cannot create temporary file in '{}': {source}", .dir.display())]
    TempCreate { dir: PathBuf, source: io::Error },

    #[error("copy '{}' -> '{}' failed: {source}", .src.display(), .tmp.display())]
    Copy {
        src: PathBuf,
        tmp: PathBuf,
        source: io::Error,
    },

    #[error("cannot finish temporary file '{}': {source}", .tmp.display())]
    Close { tmp: PathBuf, source: io::Error },

    #[error("cannot set permissions on '{}': {source}", .path.display())]
    Chmod { path: PathBuf, source: io::Error },

    #[error("cannot set owner {uid}:{gid} on '{}': {source}", .path.display())]
    Chown {
        path: PathBuf,
        uid: u32,
        gid: u32,
        source: io::Error,
    },

    #[error("rename '{}' -> '{}' failed: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("cannot resolve absolute path for '{}': {source}", .path.display())]
    Resolution { path: PathBuf, source: io::Error },

    #[error("cannot create directory '{}': {source}", .path.display())]
    DirCreate { path: PathBuf, source: io::Error },

    #[error("cannot stat '{}': {source}", .path.display())]
    Stat { path: PathBuf, source: io::Error },
}

impl FsError {
    /// Classify a failed stat of the copy source.
    pub(crate) fn source_stat(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            FsError::SourceNotFound { path, source }
        } else {
            FsError::SourceUnreadable { path, source }
        }
    }

    /// Stable short code, suitable for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            FsError::SourceNotFound { .. } => "source_not_found",
            FsError::SourceUnreadable { .. } => "source_unreadable",
            FsError::SourceOpen { .. } => "source_open",
            FsError::InvalidDestination { .. } => "invalid_destination",
            FsError::TempCreate { .. } => "temp_create",
            FsError::Copy { .. } => "copy",
            FsError::Close { .. } => "close",
            FsError::Chmod { .. } => "chmod",
            FsError::Chown { .. } => "chown",
            FsError::Rename { .. } => "rename",
            FsError::Resolution { .. } => "resolution",
            FsError::DirCreate { .. } => "dir_create",
            FsError::Stat { .. } => "stat",
        }
    }

    /// The path the failing step operated on.
    pub fn path(&self) -> &Path {
        match self {
            FsError::SourceNotFound { path, .. }
            | FsError::SourceUnreadable { path, .. }
            | FsError::SourceOpen { path, .. }
            | FsError::InvalidDestination { path }
            | FsError::Chmod { path, .. }
            | FsError::Chown { path, .. }
            | FsError::Resolution { path, .. }
            | FsError::DirCreate { path, .. }
            | FsError::Stat { path, .. } => path,
            FsError::TempCreate { dir, .. } => dir,
            FsError::Copy { tmp, .. } | FsError::Close { tmp, .. } => tmp,
            FsError::Rename { to, .. } => to,
        }
    }

    /// Underlying OS error, if the step failed inside a syscall.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            FsError::InvalidDestination { .. } => None,
            FsError::SourceNotFound { source, .. }
            | FsError::SourceUnreadable { source, .. }
            | FsError::SourceOpen { source, .. }
            | FsError::TempCreate { source, .. }
            | FsError::Copy { source, .. }
            | FsError::Close { source, .. }
            | FsError::Chmod { source, .. }
            | FsError::Chown { source, .. }
            | FsError::Rename { source, .. }
            | FsError::Resolution { source, .. }
            | FsError::DirCreate { source, .. }
            | FsError::Stat { source, .. } => Some(source),
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    ///
    /// Stream and close failures are transient unless the OS error says the
    /// object itself is unusable (a directory source, a denied read).
    /// Creation and rename failures are transient only for busy/exhaustion
    /// style OS errors. Everything on the source side, and permission or
    /// ownership replication, is structural.
    pub fn is_retryable(&self) -> bool {
        match self {
            FsError::Copy { source, .. } | FsError::Close { source, .. } => !is_structural(source),
            FsError::TempCreate { source, .. }
            | FsError::Rename { source, .. }
            | FsError::DirCreate { source, .. } => is_transient(source),
            _ => false,
        }
    }

    /// Platform-aware remediation hint for the underlying OS error.
    pub fn hint(&self) -> Option<&'static str> {
        self.io_error().and_then(hint_for)
    }
}

fn is_structural(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::IsADirectory
            | io::ErrorKind::NotADirectory
            | io::ErrorKind::PermissionDenied
            | io::ErrorKind::InvalidInput
            | io::ErrorKind::Unsupported
    )
}

fn is_transient(e: &io::Error) -> bool {
    if matches!(
        e.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    ) {
        return true;
    }
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        return matches!(
            code,
            libc::EBUSY | libc::EAGAIN | libc::EINTR | libc::EMFILE | libc::ENFILE | libc::ENOSPC
        );
    }
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        // ERROR_TOO_MANY_OPEN_FILES, ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION, ERROR_DISK_FULL
        return matches!(code, 4 | 32 | 33 | 112);
    }
    false
}

/// Map an OS error to a short, actionable hint.
pub fn hint_for(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => {
                    Some("permission denied; check ownership and write permissions")
                }
                libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
                libc::EBUSY => Some("resource busy; ensure no other process is writing"),
                libc::ENOENT => Some("path not found; verify it exists"),
                libc::ENOTDIR => Some("a path component is not a directory"),
                libc::EISDIR => Some("path is a directory, not a file"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem; cannot write here"),
                libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
                libc::ENAMETOOLONG => Some("filename or path too long; shorten path segments"),
                libc::EMFILE => Some("process file descriptor limit reached"),
                libc::ENFILE => Some("system-wide file table overflow"),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => Some("access denied; check permissions"),
                17 => Some("not same device; atomic rename not possible"),
                32 => Some("sharing violation; file is in use"),
                2 | 3 => Some("path not found; verify it exists"),
                112 => Some("insufficient disk space"),
                19 => Some("write protected / read-only media"),
                206 => Some("filename or path too long"),
                4 => Some("too many open files"),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and write permissions")
        }
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists; remove or choose a unique name"),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            Some("busy/timed out; retry after the current write finishes")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_classified_as_not_found() {
        let e = FsError::source_stat(Path::new("/nope"), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(e, FsError::SourceNotFound { .. }));
        assert_eq!(e.code(), "source_not_found");
        assert!(!e.is_retryable());
    }

    #[test]
    fn other_stat_failures_are_unreadable() {
        let e = FsError::source_stat(
            Path::new("/locked/file"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(e, FsError::SourceUnreadable { .. }));
        assert_eq!(e.path(), Path::new("/locked/file"));
        assert!(e.hint().unwrap().contains("permission denied"));
    }

    #[test]
    fn write_failures_are_retryable() {
        let e = FsError::Copy {
            src: PathBuf::from("a"),
            tmp: PathBuf::from(".b.x.tmp"),
            source: io::Error::other("disk hiccup"),
        };
        assert!(e.is_retryable());
        assert_eq!(e.path(), Path::new(".b.x.tmp"));
    }

    #[cfg(unix)]
    #[test]
    fn rename_retryable_only_when_busy() {
        let busy = FsError::Rename {
            from: PathBuf::from("t"),
            to: PathBuf::from("d"),
            source: io::Error::from_raw_os_error(libc::EBUSY),
        };
        let xdev = FsError::Rename {
            from: PathBuf::from("t"),
            to: PathBuf::from("d"),
            source: io::Error::from_raw_os_error(libc::EXDEV),
        };
        assert!(busy.is_retryable());
        assert!(!xdev.is_retryable());
        assert!(xdev.hint().unwrap().contains("cross-filesystem"));
    }

    #[cfg(unix)]
    #[test]
    fn enospc_and_erofs_hints() {
        let nospc = io::Error::from_raw_os_error(libc::ENOSPC);
        let rofs = io::Error::from_raw_os_error(libc::EROFS);
        assert!(hint_for(&nospc).unwrap().contains("insufficient space"));
        assert!(hint_for(&rofs).unwrap().contains("read-only filesystem"));
    }

    #[test]
    fn invalid_destination_has_no_io_error() {
        let e = FsError::InvalidDestination { path: PathBuf::from("/") };
        assert!(e.io_error().is_none());
        assert!(e.hint().is_none());
        assert_eq!(format!("{e}"), "destination has no file name: /");
    }

    #[cfg(unix)]
    #[test]
    fn directory_read_is_not_retryable() {
        let eisdir = FsError::Copy {
            src: PathBuf::from("/srv"),
            tmp: PathBuf::from(".x.abc123.tmp"),
            source: io::Error::from_raw_os_error(libc::EISDIR),
        };
        let eio = FsError::Copy {
            src: PathBuf::from("/srv/f"),
            tmp: PathBuf::from(".x.abc123.tmp"),
            source: io::Error::from_raw_os_error(libc::EIO),
        };
        assert!(!eisdir.is_retryable());
        assert!(eio.is_retryable());
    }
}
