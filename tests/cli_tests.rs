use assert_cmd::cargo;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn write_quiet_cfg(path: &Path) {
    fs::write(path, "<config>\n  <log_level>quiet</log_level>\n</config>").unwrap();
}

fn run(cfg: &Path, args: &[&OsStr]) -> Output {
    Command::new(cargo::cargo_bin!("atomic_fs"))
        .env("ATOMIC_FS_CONFIG", cfg)
        .args(args)
        .output()
        .expect("spawn binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

#[test]
fn copy_replaces_destination() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("config.xml");
    write_quiet_cfg(&cfg);
    let src = base.join("in.txt");
    let dst = base.join("out.txt");
    fs::write(&src, b"payload").unwrap();
    fs::write(&dst, b"stale").unwrap();

    let out = run(&cfg, &[OsStr::new("copy"), src.as_os_str(), dst.as_os_str()]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(fs::read(&dst).unwrap(), b"payload");
}

#[test]
fn copy_missing_source_exits_2() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("config.xml");
    write_quiet_cfg(&cfg);
    let src = base.join("absent");
    let dst = base.join("out.txt");

    let out = run(&cfg, &[OsStr::new("copy"), src.as_os_str(), dst.as_os_str()]);
    assert_eq!(out.status.code(), Some(2));
    let err = stderr(&out);
    assert!(err.contains("source not found"), "stderr: {err}");
    assert!(!dst.exists());
}

#[test]
fn exists_reports_on_stdout_and_exit_code() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("config.xml");
    write_quiet_cfg(&cfg);

    let out = run(&cfg, &[OsStr::new("exists"), cfg.as_os_str()]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "true");

    let missing = base.join("missing.txt");
    let out = run(&cfg, &[OsStr::new("exists"), missing.as_os_str()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "false");

    let out = run(&cfg, &[OsStr::new("exists"), base.as_os_str()]);
    assert_eq!(out.status.code(), Some(1), "a directory is not a file");
    assert_eq!(stdout(&out), "false");
}

#[test]
fn ensure_prints_absolute_path_and_creates_parent() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("config.xml");
    write_quiet_cfg(&cfg);

    let out = Command::new(cargo::cargo_bin!("atomic_fs"))
        .env("ATOMIC_FS_CONFIG", &cfg)
        .current_dir(&base)
        .args(["ensure", "nested/dir/file.txt", "--mode", "700"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        base.join("nested").join("dir").join("file.txt").display().to_string()
    );
    assert!(base.join("nested").join("dir").is_dir());
    assert!(!base.join("nested").join("dir").join("file.txt").exists());
}

#[test]
fn print_config_reports_env_path() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("custom.xml");

    let out = run(&cfg, &[OsStr::new("--print-config")]);
    assert!(out.status.success());
    let err = stderr(&out);
    assert!(err.contains("ATOMIC_FS_CONFIG"), "stderr: {err}");
    assert!(err.contains("custom.xml"), "stderr: {err}");
}

#[test]
fn invalid_config_exits_2() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config><log_level>loud</log_level></config>").unwrap();

    let out = run(&cfg, &[OsStr::new("exists"), cfg.as_os_str()]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).is_empty());
}

#[test]
fn missing_explicit_config_exits_2() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("nowhere.xml");

    let out = run(&cfg, &[OsStr::new("exists"), cfg.as_os_str()]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("missing file"), "stderr: {}", stderr(&out));
}

#[test]
fn empty_config_env_is_not_reported_as_explicit() {
    let out = Command::new(cargo::cargo_bin!("atomic_fs"))
        .env("ATOMIC_FS_CONFIG", "")
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    let err = stderr(&out);
    assert!(!err.contains("(explicit)"), "stderr: {err}");
}
