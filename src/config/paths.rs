//! Default path helpers and symlink checks.
//! Determines the config file location and detects symlinked ancestors for safety.

use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ATOMIC_FS_CONFIG";

/// Config path: `$ATOMIC_FS_CONFIG` if set, else the OS config dir.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(p));
    }
    if let Some(mut base) = config_dir() {
        base.push("atomic_fs");
        base.push("config.xml");
        Some(base)
    } else {
        env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("atomic_fs")
                .join("config.xml")
        })
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
