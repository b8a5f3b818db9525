//! Core library for `atomic_fs`.
//!
//! Three small filesystem helpers:
//! - [`copy_file`]: atomically replace a destination with a copy of a source,
//!   carrying permission bits and (on POSIX) owner/group.
//! - [`ensure_path`]: absolute path with its parent directory guaranteed to exist.
//! - [`file_exists`]: regular-file check that separates "absent" from "could not tell".
//!
//! The CLI pieces (`cli`, `config`, `output`, `platform`) are public so the
//! binary and integration tests can share them.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use config::{default_config_path, path_has_symlink_ancestor, Config, LogLevel};
pub use errors::FsError;
pub use fs_ops::{
    copy_file, copy_file_with, ensure_path, file_exists, CopyOptions, CopyReport, Durability,
};

/// Convenience re-exports for library callers.
pub mod prelude {
    pub use crate::config::{default_config_path, Config, LogLevel};
    pub use crate::errors::FsError as Error;
    pub use crate::fs_ops::{
        copy_file, copy_file_with, ensure_path, file_exists, CopyOptions, CopyReport, Durability,
    };

    /// Result alias over the crate error.
    pub type FsResult<T> = std::result::Result<T, Error>;
}
