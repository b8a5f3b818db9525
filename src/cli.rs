//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Logging flags are global and may appear before or after the subcommand.
//! - --debug is a shorthand for --log-level debug.
//! - CLI values override config file values.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{parse_mode, Config, LogLevel};
use crate::fs_ops::Durability;

/// Command-line front end for the atomic_fs library.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Atomic file copy and path helpers",
    arg_required_else_help = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the config file location (or ATOMIC_FS_CONFIG if set), then exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Atomically replace DEST with a copy of SRC (content, mode, owner).
    Copy {
        #[arg(value_hint = ValueHint::FilePath)]
        src: PathBuf,
        #[arg(value_hint = ValueHint::FilePath)]
        dest: PathBuf,
        /// Flush policy before the rename: data | full.
        #[arg(long)]
        durability: Option<Durability>,
        /// Also copy access/modification times.
        #[arg(long)]
        preserve_times: bool,
    },
    /// Print the absolute form of PATH, creating its parent directories if missing.
    Ensure {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        /// Octal mode for created directories (e.g. 755).
        #[arg(long, value_parser = parse_mode_arg)]
        mode: Option<u32>,
    },
    /// Print whether PATH is an existing regular file (exit 0 if so, 1 if not).
    Exists {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
}

fn parse_mode_arg(s: &str) -> Result<u32, String> {
    parse_mode(s).ok_or_else(|| format!("invalid octal mode: '{s}'"))
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        match &self.command {
            Some(Command::Copy {
                durability,
                preserve_times,
                ..
            }) => {
                if let Some(d) = durability {
                    cfg.durability = *d;
                }
                if *preserve_times {
                    cfg.preserve_times = true;
                }
            }
            Some(Command::Ensure {
                mode: Some(mode), ..
            }) => cfg.dir_mode = *mode,
            _ => {}
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
