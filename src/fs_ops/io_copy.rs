//! Streaming copy into an already-open temp file, plus the durability policy
//! applied before the handle is closed.
//!
//! Snapshot semantics: the source is read once from start to EOF; if it grows
//! concurrently, the additional bytes are not included.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::str::FromStr;

/// 1 MiB buffers to reduce syscall count on large files.
pub(super) const BUF_SIZE: usize = 1024 * 1024;

/// Durability mode controlling post-write flush behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Durability {
    /// Ensure written data reaches the OS page cache (`flush`), but do not force
    /// a disk barrier. Fastest; may lose data on sudden power loss.
    Data,
    /// Force data and metadata to stable storage (`sync_all`) before the
    /// rename, and fsync the destination directory afterwards.
    #[default]
    Full,
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Durability::Data => "data",
            Durability::Full => "full",
        })
    }
}

impl FromStr for Durability {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "data" | "fast" | "flush" => Ok(Durability::Data),
            "full" | "sync" | "fsync" => Ok(Durability::Full),
            other => Err(format!("invalid durability: '{other}' (expected data|full)")),
        }
    }
}

/// Copy every byte of `src` into `dst` using buffered I/O.
/// Returns the number of bytes written. Buffered data is flushed to `dst`
/// before returning, so a flush failure surfaces here as a write error.
pub(super) fn stream(src: File, dst: &mut File) -> io::Result<u64> {
    let mut reader = BufReader::with_capacity(BUF_SIZE, src);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}

/// Apply the durability policy to a fully written file.
pub(super) fn finish(dst: &File, mode: Durability) -> io::Result<()> {
    match mode {
        Durability::Data => Ok(()),
        Durability::Full => dst.sync_all(),
    }
}
