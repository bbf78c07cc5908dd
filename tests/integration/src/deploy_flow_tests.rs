//! End-to-end deployment flow tests
//!
//! These exercise the real runner against throwaway git repositories
//! created with the `git` CLI and a stub virtualenv whose `pip` records its
//! invocations instead of installing anything.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use redeploy_core::{
    DeployConfig, Error, LocalDispatch, Plan, ResetPolicy, Runner, SilentObserver, StepKind,
};

/// Run a git command in `dir`, asserting success.
fn git(dir: &Path, args: &[&str]) {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        out.status.success(),
        "git {:?} failed:\n{}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
}

fn git_identity(dir: &Path) {
    for (k, v) in [
        ("user.email", "test@example.com"),
        ("user.name", "Test"),
        ("commit.gpgsign", "false"),
    ] {
        git(dir, &["config", k, v]);
    }
}

fn write_exec(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

/// Stub venv whose pip logs its arguments and exits 0.
fn make_stub_venv(dir: &Path) -> PathBuf {
    let bin = dir.join("venv").join(redeploy_env::scripts_dir_name());
    fs::create_dir_all(&bin).unwrap();
    fs::write(bin.join("activate"), "# stub activate\n").unwrap();
    write_exec(&bin.join("python"), "#!/bin/sh\nexit 0\n");
    write_exec(
        &bin.join("pip"),
        "#!/bin/sh\necho \"$@\" >> \"$(dirname \"$0\")/pip-invocations.log\"\nexit 0\n",
    );
    dir.join("venv")
}

/// Bare origin, a seed clone for publishing commits, and the app checkout.
///
/// `files` seeds the initial commit.
fn setup_repos(temp: &Path, files: &[(&str, &str)]) -> (PathBuf, PathBuf) {
    git(temp, &["init", "--bare", "-b", "main", "origin.git"]);
    let origin = temp.join("origin.git");

    git(temp, &["clone", origin.to_str().unwrap(), "seed"]);
    let seed = temp.join("seed");
    git_identity(&seed);
    // The clone of an empty remote starts on the host's default branch.
    git(&seed, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    for (name, content) in files {
        fs::write(seed.join(name), content).unwrap();
    }
    git(&seed, &["add", "."]);
    git(&seed, &["commit", "-m", "initial"]);
    git(&seed, &["push", "origin", "main"]);

    git(temp, &["clone", origin.to_str().unwrap(), "app"]);
    let app = temp.join("app");
    git_identity(&app);

    (seed, app)
}

fn pip_log(venv: &Path) -> Option<String> {
    fs::read_to_string(venv.join("bin").join("pip-invocations.log")).ok()
}

#[test]
fn test_deploy_resets_pulls_and_installs() {
    let temp = TempDir::new().unwrap();
    let (seed, app) = setup_repos(
        temp.path(),
        &[("requirements.txt", "flask\n"), ("app.py", "print('v1')\n")],
    );
    let venv = make_stub_venv(temp.path());

    // Advance the remote and dirty the local checkout.
    fs::write(seed.join("app.py"), "print('v2')\n").unwrap();
    git(&seed, &["commit", "-am", "update"]);
    git(&seed, &["push", "origin", "main"]);
    fs::write(app.join("app.py"), "local garbage\n").unwrap();

    let config = DeployConfig::default();
    let plan = Plan::build(&app, &config);
    let mut dispatch = LocalDispatch::new(&app, config.venv.path.clone());
    let report = Runner::new(&plan).run(&mut dispatch, &mut SilentObserver);

    assert!(report.success(), "run failed: {:?}", report.failure);
    assert_eq!(report.executed.len(), plan.len());

    // The local edit was discarded and the remote head pulled.
    assert_eq!(
        fs::read_to_string(app.join("app.py")).unwrap(),
        "print('v2')\n"
    );

    // Exactly one install, in upgrade mode, from the repo root.
    assert_eq!(
        pip_log(&venv).unwrap().trim(),
        "install -r requirements.txt --upgrade"
    );
}

#[test]
fn test_before_and_after_policy_resets_twice() {
    let temp = TempDir::new().unwrap();
    let (_seed, app) = setup_repos(temp.path(), &[("requirements.txt", "flask\n")]);
    let venv = make_stub_venv(temp.path());

    let mut config = DeployConfig::default();
    config.git.reset_policy = ResetPolicy::BeforeAndAfter;
    let plan = Plan::build(&app, &config);
    let mut dispatch = LocalDispatch::new(&app, config.venv.path.clone());
    let report = Runner::new(&plan).run(&mut dispatch, &mut SilentObserver);

    assert!(report.success(), "run failed: {:?}", report.failure);
    let resets = report
        .executed
        .iter()
        .filter(|r| matches!(r.step, StepKind::ResetHard { .. }))
        .count();
    assert_eq!(resets, 2);
    assert_eq!(pip_log(&venv).unwrap().lines().count(), 1);
}

#[test]
fn test_missing_venv_aborts_before_anything_else() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("app");
    fs::create_dir(&app).unwrap();

    let config = DeployConfig::default();
    let plan = Plan::build(&app, &config);
    let mut dispatch = LocalDispatch::new(&app, config.venv.path.clone());
    let report = Runner::new(&plan).run(&mut dispatch, &mut SilentObserver);

    assert!(!report.success());
    // Only the first step was dispatched; the git steps never ran even
    // though the directory is not a repository.
    assert_eq!(report.executed.len(), 1);
    let (step, error) = report.failure.as_ref().unwrap();
    assert!(matches!(step, StepKind::ChangeDir { .. }));
    assert!(matches!(error, Error::DirNotFound { .. }));
}

#[test]
fn test_missing_activate_script_aborts_at_activation() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("app");
    fs::create_dir(&app).unwrap();
    // A venv directory without an activate script.
    fs::create_dir_all(temp.path().join("venv").join("bin")).unwrap();

    let config = DeployConfig::default();
    let plan = Plan::build(&app, &config);
    let mut dispatch = LocalDispatch::new(&app, config.venv.path.clone());
    let report = Runner::new(&plan).run(&mut dispatch, &mut SilentObserver);

    assert!(!report.success());
    assert_eq!(report.executed.len(), 2);
    let (step, error) = report.failure.as_ref().unwrap();
    assert!(matches!(step, StepKind::ActivateEnv));
    assert!(matches!(error, Error::Env(_)));
}

#[test]
fn test_missing_manifest_fails_the_install_step() {
    let temp = TempDir::new().unwrap();
    // The remote never had a requirements.txt.
    let (_seed, app) = setup_repos(temp.path(), &[("app.py", "print('v1')\n")]);
    let venv = make_stub_venv(temp.path());

    let config = DeployConfig::default();
    let plan = Plan::build(&app, &config);
    let mut dispatch = LocalDispatch::new(&app, config.venv.path.clone());
    let report = Runner::new(&plan).run(&mut dispatch, &mut SilentObserver);

    assert!(!report.success());
    assert_eq!(report.executed.len(), plan.len());
    let (step, error) = report.failure.as_ref().unwrap();
    assert!(matches!(step, StepKind::InstallPackages { .. }));
    assert!(matches!(error, Error::ManifestNotFound { .. }));
    // pip itself was never invoked.
    assert!(pip_log(&venv).is_none());
}
