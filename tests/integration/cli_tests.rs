//! CLI tests: run the binary from a scratch working directory

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Lay out `SnM/SnM_ModernPlaylistUI.cpp` under a fresh directory
fn project_with_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("SnM")).unwrap();
    fs::copy(
        fixtures_path().join("SnM_ModernPlaylistUI.cpp"),
        dir.path().join("SnM/SnM_ModernPlaylistUI.cpp"),
    )
    .unwrap();
    dir
}

fn lice_fixer() -> Command {
    Command::cargo_bin("lice-fixer").unwrap()
}

#[test]
fn test_cli_rewrites_fixed_target() {
    let dir = project_with_fixture();

    lice_fixer()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed SnM/SnM_ModernPlaylistUI.cpp"))
        .stdout(predicate::str::contains(
            "Backup saved to SnM/SnM_ModernPlaylistUI.cpp.backup",
        ));

    let out = fs::read_to_string(dir.path().join("SnM/SnM_ModernPlaylistUI.cpp")).unwrap();
    assert!(out.contains("DrawTextWithFont("));
    assert!(!out.contains("LICE_MeasureText("));

    let backup =
        fs::read(dir.path().join("SnM/SnM_ModernPlaylistUI.cpp.backup")).unwrap();
    let original = fs::read(fixtures_path().join("SnM_ModernPlaylistUI.cpp")).unwrap();
    assert_eq!(backup, original);
}

#[test]
fn test_cli_stdout_is_only_status_lines() {
    let dir = project_with_fixture();

    lice_fixer()
        .arg("--verbose")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(
            "Fixed SnM/SnM_ModernPlaylistUI.cpp\n\
             Backup saved to SnM/SnM_ModernPlaylistUI.cpp.backup\n",
        );
}

#[test]
fn test_cli_missing_target_fails() {
    let dir = TempDir::new().unwrap();

    lice_fixer()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("SnM_ModernPlaylistUI.cpp"));

    assert!(!dir.path().join("SnM/SnM_ModernPlaylistUI.cpp.backup").exists());
}

#[test]
fn test_cli_quiet_still_prints_status() {
    let dir = project_with_fixture();

    lice_fixer()
        .arg("--quiet")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed SnM/SnM_ModernPlaylistUI.cpp"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_cli_rejects_positional_path() {
    let dir = project_with_fixture();

    lice_fixer()
        .arg("other.cpp")
        .current_dir(dir.path())
        .assert()
        .failure();
}
