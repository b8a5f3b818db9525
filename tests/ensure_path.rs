use std::fs;

use atomic_fs::{ensure_path, FsError};
use serial_test::serial;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn existing_file_returns_its_absolute_path() {
    let td = tempdir().unwrap();
    let tmp = NamedTempFile::new_in(td.path()).unwrap();
    let want = td.path().join(tmp.path().file_name().unwrap());

    let got = ensure_path(tmp.path(), 0o755).unwrap();
    assert_eq!(got, want);
    fs::File::open(&got).expect("file should still open");
}

#[test]
fn missing_parent_chain_is_created() {
    let td = tempdir().unwrap();
    let uncreated = td.path().join("newDir").join("deeper").join("testFile.txt");

    let got = ensure_path(&uncreated, 0o700).unwrap();
    assert_eq!(got, uncreated);
    assert!(uncreated.parent().unwrap().is_dir());
    assert!(!uncreated.exists(), "only the parent is created");
    fs::File::create(&got).expect("create at returned path");
}

#[test]
fn existing_parent_is_not_mutated() {
    let td = tempdir().unwrap();
    let before: Vec<_> = fs::read_dir(td.path()).unwrap().flatten().map(|e| e.path()).collect();
    ensure_path(td.path().join("later.txt"), 0o700).unwrap();
    let after: Vec<_> = fs::read_dir(td.path()).unwrap().flatten().map(|e| e.path()).collect();
    assert_eq!(before, after);
}

#[test]
fn dot_components_are_cleaned() {
    let td = tempdir().unwrap();
    let messy = td.path().join("a").join(".").join("b").join("..").join("c.txt");
    let got = ensure_path(&messy, 0o700).unwrap();
    assert_eq!(got, td.path().join("a").join("c.txt"));
    assert!(td.path().join("a").is_dir());
    assert!(!td.path().join("a").join("b").exists());
}

#[test]
#[serial]
fn relative_path_resolves_against_current_dir() {
    let td = tempdir().unwrap();
    let prev = std::env::current_dir().unwrap();
    std::env::set_current_dir(td.path()).unwrap();
    let res = ensure_path("sub/file.txt", 0o700);
    let cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(prev).unwrap();

    let got = res.unwrap();
    assert!(got.is_absolute());
    assert_eq!(got, cwd.join("sub").join("file.txt"));
    assert!(cwd.join("sub").is_dir());
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn created_dirs_use_requested_mode() {
        let td = tempdir().unwrap();
        let target = td.path().join("m1").join("m2").join("f");
        ensure_path(&target, 0o700).unwrap();
        for dir in [td.path().join("m1"), td.path().join("m1").join("m2")] {
            let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o700, "{}", dir.display());
        }
    }

    #[test]
    fn unwritable_ancestor_is_dir_create_error() {
        if unsafe { libc::geteuid() } == 0 {
            eprintln!("skipping: running as root");
            return;
        }
        let td = tempdir().unwrap();
        let ro = td.path().join("ro");
        fs::create_dir_all(&ro).unwrap();
        fs::set_permissions(&ro, fs::Permissions::from_mode(0o555)).unwrap();

        let res = ensure_path(ro.join("child").join("f"), 0o755);
        fs::set_permissions(&ro, fs::Permissions::from_mode(0o755)).unwrap();
        let err = res.unwrap_err();
        assert!(matches!(err, FsError::DirCreate { .. }), "{err}");
        assert!(err.hint().is_some());
    }
}
