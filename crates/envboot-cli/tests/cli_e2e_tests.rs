//! End-to-end tests for the envboot binary.
//!
//! These never reach a real interpreter. `PATH` points at an empty
//! directory, or at one holding a shell-script stand-in for `python3`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn envboot(path_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_envboot"));
    cmd.env("PATH", path_dir.path()).env_remove("RUST_LOG");
    cmd
}

fn entries(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_help() {
    let empty = TempDir::new().unwrap();
    envboot(&empty)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--no-clipboard"));
}

#[test]
fn test_version() {
    let empty = TempDir::new().unwrap();
    envboot(&empty)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_interpreter_fails_without_side_effects() {
    let empty = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    envboot(&empty)
        .arg("--root")
        .arg(project.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: "))
        .stderr(predicate::str::contains("Python not found"));

    assert!(entries(&project).is_empty());
}

#[test]
fn test_dry_run_without_interpreter_fails() {
    let empty = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    envboot(&empty)
        .current_dir(project.path())
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Python not found"));

    assert!(entries(&project).is_empty());
}

#[test]
fn test_explicit_config_must_exist() {
    let empty = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    envboot(&empty)
        .arg("--root")
        .arg(project.path())
        .args(["--config", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let empty = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    std::fs::write(project.path().join("envboot.toml"), "colour = \"blue\"\n").unwrap();

    envboot(&empty)
        .arg("--root")
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse bootstrap config"));

    assert_eq!(entries(&project), vec!["envboot.toml".to_string()]);
}

#[test]
fn test_custom_interpreter_list_is_used() {
    let empty = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    std::fs::write(
        project.path().join("envboot.toml"),
        "interpreters = [\"python3.12\"]\n",
    )
    .unwrap();

    envboot(&empty)
        .arg("--root")
        .arg(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("python3.12"));
}

#[test]
fn test_missing_root_directory() {
    let empty = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    envboot(&empty)
        .arg("--root")
        .arg(project.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

/// A `python3` stand-in: answers `--version`, builds a venv by copying
/// itself to `<dir>/bin/python`, upgrades pip, and fails the package
/// install with exit code 3.
#[cfg(unix)]
const FAILING_INSTALLER: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "Python 3.12.4"
    exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
    mkdir -p "$3/bin" && cp "$0" "$3/bin/python"
    exit $?
fi
if [ "$1" = "-m" ] && [ "$2" = "pip" ] && [ "$4" = "--upgrade" ]; then
    exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "pip" ]; then
    echo "Collecting fastapi"
    echo "ERROR: No matching distribution found for fastapi" >&2
    exit 3
fi
exit 0
"#;

#[cfg(unix)]
fn fake_python_path(bin: &TempDir) -> String {
    use std::os::unix::fs::PermissionsExt;

    let script = bin.path().join("python3");
    std::fs::write(&script, FAILING_INSTALLER).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    format!("{}:/usr/bin:/bin", bin.path().display())
}

#[cfg(unix)]
#[test]
fn test_install_failure_propagates_exit_code_and_stderr() {
    let bin = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_envboot"));
    cmd.env("PATH", fake_python_path(&bin))
        .env_remove("RUST_LOG")
        .arg("--root")
        .arg(project.path())
        .arg("--no-clipboard")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains(
            "error: Dependency installation from fallback package set failed (exit code 3): \
             ERROR: No matching distribution found for fastapi",
        ));

    assert!(project.path().join("venv/bin/python").is_file());
    assert!(!project.path().join("in").exists());
    assert!(!project.path().join(".env").exists());
}

#[test]
fn test_destructive_env_dir_is_refused() {
    let empty = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    std::fs::write(project.path().join("envboot.toml"), "env_dir = \"\"\n").unwrap();
    std::fs::write(project.path().join(".env"), "OPENAI_API_KEY=sk-live-real\n").unwrap();
    std::fs::create_dir(project.path().join("in")).unwrap();
    std::fs::write(project.path().join("in/speakers.csv"), "name\n").unwrap();

    envboot(&empty)
        .arg("--root")
        .arg(project.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Refusing to use"));

    assert_eq!(
        std::fs::read_to_string(project.path().join(".env")).unwrap(),
        "OPENAI_API_KEY=sk-live-real\n"
    );
    assert!(project.path().join("in/speakers.csv").exists());
}
