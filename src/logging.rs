//! Tracing initialization.
//! Builds a subscriber with EnvFilter, compact or JSON formatting on stderr, and
//! optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - Console logs go to stderr so stdout carries only command results.
//! - If `log_file` is provided and passes safety checks, a non-blocking file layer is added.
//! - File logging is refused if any ancestor of the file path is a symlink.

use anyhow::{Context, Result};
use atomic_fs::output as out;
use atomic_fs::platform::open_log_file_secure_append;
use atomic_fs::{path_has_symlink_ancestor, LogLevel};
use chrono::Local;
use std::fmt as stdfmt;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
pub(crate) fn to_level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

#[inline]
fn env_filter_from_level(level_filter: LevelFilter) -> EnvFilter {
    let level_str = match level_filter {
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::INFO => "info",
        LevelFilter::DEBUG => "debug",
        LevelFilter::TRACE => "trace",
        _ => "info",
    };
    EnvFilter::new(level_str)
}

/// One fmt layer writing to `writer`, compact or JSON.
fn fmt_layer<W>(json: bool, ansi: bool, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        tsfmt::layer()
            .event_format(tsfmt::format().json())
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    } else {
        tsfmt::layer()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .with_ansi(ansi)
            .compact()
            .with_writer(writer)
            .boxed()
    }
}

/// Try to open a non-blocking file writer for logging:
/// - Refuse if any ancestor is a symlink
/// - Open file for append (creating parents) and wrap with non_blocking
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            out::print_warn(&format!(
                "refusing file logging: an ancestor of {} is a symlink",
                path.display()
            ));
            return None;
        }
        Err(e) => {
            out::print_warn(&format!(
                "cannot check log path {} for symlinks: {e}",
                path.display()
            ));
            return None;
        }
        Ok(false) => {}
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!("failed to open log file {}: {e}", path.display()));
            None
        }
    }
}

/// Initialize tracing based on LogLevel and format. Returns an optional WorkerGuard
/// if a file appender is created (must be held until exit to flush logs).
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = env_filter_from_level(to_level_filter(lvl));
    let ansi = atty::is(atty::Stream::Stderr);

    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(json, ansi, std::io::stderr)];
    let mut guard = None;

    if let Some(path) = log_file {
        match maybe_open_non_blocking_writer(path) {
            Some((writer, g)) => {
                layers.push(fmt_layer(json, false, writer));
                guard = Some(g);
            }
            None => out::print_warn(&format!(
                "file logging to '{}' was not enabled; logs continue on stderr",
                path.display()
            )),
        }
    }

    registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("install tracing subscriber")?;
    Ok(guard)
}
