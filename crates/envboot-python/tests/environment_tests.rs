//! Integration tests for environment reconciliation, installation, and the
//! smoke test, driven through a scripted runner.

use envboot_fs::NormalizedPath;
use envboot_python::{
    Error, Interpreter, PackageSource, VirtualEnv, interpreter::default_candidates, packages,
    smoke,
};
use envboot_test_utils::{Project, ScriptedRunner};

fn interpreter(runner: &ScriptedRunner) -> Interpreter {
    Interpreter::discover(runner, &default_candidates()).unwrap()
}

#[test]
fn test_recreate_discards_previous_environment() {
    let project = Project::new();
    project.write("venv/lib/stale-package/__init__.py", "");
    let runner = ScriptedRunner::new().with_python("python3", "Python 3.12.4");
    let venv = VirtualEnv::new(NormalizedPath::new(project.path("venv")));

    let removed = venv
        .recreate(&runner, &interpreter(&runner), &NormalizedPath::new(project.root()))
        .unwrap();

    assert!(removed);
    assert!(!project.exists("venv/lib/stale-package"));
    assert!(project.exists("venv/pyvenv.cfg"));
    assert!(runner.ran_with(&["-m", "venv"]));
}

#[test]
fn test_recreate_on_fresh_checkout() {
    let project = Project::new();
    let runner = ScriptedRunner::new().with_python("python3", "Python 3.12.4");
    let venv = VirtualEnv::new(NormalizedPath::new(project.path("venv")));

    let removed = venv
        .recreate(&runner, &interpreter(&runner), &NormalizedPath::new(project.root()))
        .unwrap();

    assert!(!removed);
    assert!(project.exists("venv"));
}

#[test]
fn test_recreate_failure_reports_exit_code() {
    let project = Project::new();
    let runner = ScriptedRunner::new()
        .with_python("python3", "Python 3.12.4")
        .fail_when_arg("venv", 1, "Error: ensurepip is not available\n");
    let venv = VirtualEnv::new(NormalizedPath::new(project.path("venv")));

    let err = venv
        .recreate(&runner, &interpreter(&runner), &NormalizedPath::new(project.root()))
        .unwrap_err();

    match err {
        Error::EnvCreationFailed { code, stderr, .. } => {
            assert_eq!(code, 1);
            assert_eq!(stderr, "Error: ensurepip is not available");
        }
        other => panic!("Expected EnvCreationFailed, got {:?}", other),
    }
}

#[test]
fn test_install_from_manifest_uses_requirements_flag() {
    let project = Project::new();
    project.write("requirements.txt", "fastapi==0.110.0\n");
    let runner = ScriptedRunner::new();
    let venv = VirtualEnv::new(NormalizedPath::new(project.path("venv")));
    let manifest = NormalizedPath::new(project.path("requirements.txt"));

    let source = PackageSource::select(&manifest, &PackageSource::default_fallback());
    packages::install(&runner, &venv, &source).unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, venv.python_path().as_str());
    assert!(runner.ran_with(&["install", "-r", manifest.as_str()]));
    assert!(!runner.ran_with(&["pandas"]));
}

#[test]
fn test_install_fallback_lists_every_package() {
    let project = Project::new();
    let runner = ScriptedRunner::new();
    let venv = VirtualEnv::new(NormalizedPath::new(project.path("venv")));
    let manifest = NormalizedPath::new(project.path("requirements.txt"));

    let source = PackageSource::select(&manifest, &PackageSource::default_fallback());
    packages::install(&runner, &venv, &source).unwrap();

    let args = &runner.calls()[0].args;
    for package in packages::FALLBACK_PACKAGES {
        assert!(args.iter().any(|a| a == package), "missing {}", package);
    }
    assert!(!args.iter().any(|a| a == "-r"));
}

#[test]
fn test_install_failure_is_not_a_smoke_failure() {
    let runner = ScriptedRunner::new().fail_when_arg("install", 1, "No matching distribution");
    let venv = VirtualEnv::new(NormalizedPath::new("/nowhere/venv"));
    let source = PackageSource::Fallback(vec!["openai".to_string()]);

    let err = packages::install(&runner, &venv, &source).unwrap_err();
    assert!(matches!(err, Error::InstallFailed { code: 1, .. }));
}

#[test]
fn test_pip_upgrade_failure() {
    let runner = ScriptedRunner::new().fail_when_arg("--upgrade", 2, "");
    let venv = VirtualEnv::new(NormalizedPath::new("/nowhere/venv"));

    let err = packages::upgrade_pip(&runner, &venv).unwrap_err();
    assert!(matches!(err, Error::PipUpgradeFailed { code: 2, .. }));
}

#[test]
fn test_smoke_test_runs_single_combined_import() {
    let runner = ScriptedRunner::new();
    let venv = VirtualEnv::new(NormalizedPath::new("/nowhere/venv"));
    let modules: Vec<String> = packages::SMOKE_IMPORTS.iter().map(|m| m.to_string()).collect();

    smoke::smoke_test(&runner, &venv, &modules).unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args[0], "-c");
    assert_eq!(
        calls[0].args[1],
        "import fastapi, uvicorn, pydantic, dotenv, pandas, requests, openai, multipart, bs4"
    );
}

#[test]
fn test_smoke_test_failure_is_distinct() {
    let runner = ScriptedRunner::new().fail_when_arg(
        "-c",
        1,
        "Traceback (most recent call last):\nModuleNotFoundError: No module named 'bs4'\n",
    );
    let venv = VirtualEnv::new(NormalizedPath::new("/nowhere/venv"));

    let err = smoke::smoke_test(&runner, &venv, &["bs4".to_string()]).unwrap_err();
    match err {
        Error::SmokeTestFailed {
            modules,
            code,
            stderr,
        } => {
            assert_eq!(modules, vec!["bs4"]);
            assert_eq!(code, 1);
            assert_eq!(stderr, "ModuleNotFoundError: No module named 'bs4'");
        }
        other => panic!("Expected SmokeTestFailed, got {:?}", other),
    }
}
