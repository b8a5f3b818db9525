//! Application orchestrator.
//! Loads/merges config, initializes logging and dispatches the subcommand.
//!
//! Exit codes: 0 success (or `exists` found a regular file), 1 `exists` found
//! nothing, 2 any error.

use anyhow::{bail, Result};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, info};

use atomic_fs::cli::{Args, Command};
use atomic_fs::config::{default_config_path, load_config, CONFIG_ENV};
use atomic_fs::output as out;
use atomic_fs::{copy_file_with, ensure_path, file_exists, Config, FsError};

use crate::logging::init_tracing;

pub const EXIT_NOT_FOUND: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(ExitCode::SUCCESS);
    }

    let (mut cfg, cfg_path) = load_config()?;
    args.apply_overrides(&mut cfg);

    // Held until return so the file appender flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)?;

    if let Some(p) = &cfg_path {
        debug!(config = %p.display(), "using config file");
    }
    debug!(?args, "starting atomic_fs");

    let Some(command) = &args.command else {
        bail!("no command given; see --help");
    };
    match command {
        Command::Copy { src, dest, .. } => run_copy(&cfg, src, dest),
        Command::Ensure { path, .. } => run_ensure(&cfg, path),
        Command::Exists { path } => run_exists(path),
    }
}

fn print_config_location() {
    if let Some(p) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit): {}", Path::new(&p).display()));
        return;
    }
    match default_config_path() {
        Some(p) => {
            let state = if p.exists() { "present" } else { "not present; defaults apply" };
            out::print_info(&format!("Config path: {} ({state})", p.display()));
        }
        None => out::print_warn("Could not determine a default config path; defaults apply."),
    }
}

fn run_copy(cfg: &Config, src: &Path, dest: &Path) -> Result<ExitCode> {
    match copy_file_with(dest, src, &cfg.copy_options()) {
        Ok(report) => {
            info!(
                src = %src.display(),
                dest = %report.dest.display(),
                bytes = report.bytes,
                ownership = report.ownership_applied,
                durability = %cfg.durability,
                "copy completed"
            );
            out::print_success(&format!(
                "copied '{}' -> '{}' ({} bytes)",
                src.display(),
                report.dest.display(),
                report.bytes
            ));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(log_failure("copy", e)),
    }
}

fn run_ensure(cfg: &Config, path: &Path) -> Result<ExitCode> {
    match ensure_path(path, cfg.dir_mode) {
        Ok(abs) => {
            info!(path = %abs.display(), mode = format!("{:o}", cfg.dir_mode), "path ensured");
            out::print_user(&abs.display().to_string());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(log_failure("ensure", e)),
    }
}

fn run_exists(path: &Path) -> Result<ExitCode> {
    match file_exists(path) {
        Ok(found) => {
            debug!(path = %path.display(), found, "existence check");
            out::print_user(if found { "true" } else { "false" });
            Ok(if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_NOT_FOUND)
            })
        }
        Err(e) => Err(log_failure("exists", e)),
    }
}

/// Structured log of a failed operation; hands the error back for reporting.
fn log_failure(op: &'static str, e: FsError) -> anyhow::Error {
    error!(
        op,
        code = e.code(),
        retryable = e.is_retryable(),
        path = %e.path().display(),
        error = %e,
        "operation failed"
    );
    e.into()
}

/// One-line message for the user, with an OS hint when the cause is an FsError.
pub fn describe_error(e: &anyhow::Error) -> String {
    match e.downcast_ref::<FsError>() {
        Some(fs_err) => match fs_err.hint() {
            Some(hint) => format!("{fs_err} ({hint})"),
            None => fs_err.to_string(),
        },
        None => format!("{e:#}"),
    }
}
