//! Filesystem operations: atomic copy, directory-ensuring path resolution, existence check.
//! All calls are synchronous, hold no shared state, and may be issued from any thread.

mod atomic;
mod copy;
mod ensure;
mod exists;
mod io_copy;
pub mod metadata;
pub mod ownership;
mod util;

pub use copy::{copy_file, copy_file_with, CopyOptions, CopyReport};
pub use ensure::{absolutize, ensure_path};
pub use exists::file_exists;
pub use io_copy::Durability;
pub use util::{is_temp_artifact, TEMP_SUFFIX};
