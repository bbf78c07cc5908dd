//! Subprocess execution for external collaborators
//!
//! The version-control client and the package manager are consumed as
//! external executables, never reimplemented. Version-control commands
//! capture their output so failures can report stderr; package installs
//! stream theirs live so the operator sees install progress.

use std::path::Path;
use std::process::{Command, Stdio};

use redeploy_env::Activation;

use crate::error::{Error, Result};

/// Run `program` with `args` in `cwd`, capturing output.
///
/// Returns stdout on success; a non-zero exit maps to
/// [`Error::CommandFailed`] carrying the exit code and stderr.
pub fn run_captured(
    program: &str,
    args: &[&str],
    cwd: &Path,
    activation: Option<&Activation>,
) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(cwd);
    if let Some(activation) = activation {
        activation.apply(&mut cmd);
    }

    tracing::debug!(%program, ?args, cwd = %cwd.display(), "running command");

    let output = cmd.output().map_err(|source| Error::Spawn {
        program: program.to_string(),
        source,
    })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(Error::CommandFailed {
            program: program.to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        })
    }
}

/// Execute the package manager's install command.
///
/// Invokes `pip install -r <manifest>` (plus `--upgrade` when requested) in
/// `cwd` with the activation overlay applied. Stdout and stderr are both
/// inherited so warnings and progress are visible during installation; a
/// non-zero exit returns [`Error::InstallFailed`].
pub fn run_install(
    pip: &Path,
    manifest: &Path,
    upgrade: bool,
    cwd: &Path,
    activation: &Activation,
) -> Result<()> {
    let mut cmd = Command::new(pip);
    cmd.arg("install").arg("-r").arg(manifest);
    if upgrade {
        cmd.arg("--upgrade");
    }
    cmd.current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    activation.apply(&mut cmd);

    tracing::debug!(
        pip = %pip.display(),
        manifest = %manifest.display(),
        upgrade,
        "installing packages"
    );

    let status = cmd.status().map_err(|source| Error::Spawn {
        program: pip.display().to_string(),
        source,
    })?;

    if !status.success() {
        return Err(Error::InstallFailed {
            code: status.code().unwrap_or(-1),
        });
    }

    Ok(())
}
