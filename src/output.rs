//! User-facing messages for the CLI.
//! Prefixed lines (`info:`, `warn:`, `error:`, `ok:`) go to stderr, colored only
//! when stderr is a TTY. Primary results (paths, booleans) go through
//! `print_user` without a prefix so scripts can consume them.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Warn,
    Error,
    Ok,
}

fn emit(tone: Tone, msg: &str) {
    let label = match tone {
        Tone::Info => "info:",
        Tone::Warn => "warn:",
        Tone::Error => "error:",
        Tone::Ok => "ok:",
    };
    if atty::is(atty::Stream::Stderr) {
        let colored = match tone {
            Tone::Info => label.cyan().bold().to_string(),
            Tone::Warn => label.yellow().bold().to_string(),
            Tone::Error => label.red().bold().to_string(),
            Tone::Ok => label.green().bold().to_string(),
        };
        eprintln!("{colored} {msg}");
    } else {
        eprintln!("{label} {msg}");
    }
}

pub fn print_info(msg: &str) {
    emit(Tone::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tone::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Tone::Ok, msg);
}

/// Plain stdout line (no prefix) for results scripts may capture.
pub fn print_user(msg: &str) {
    println!("{msg}");
}
