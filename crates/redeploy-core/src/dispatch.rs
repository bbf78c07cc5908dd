//! Live step dispatch
//!
//! Tracks the working directory as run state and delegates the
//! version-control and package-manager steps to their external executables.
//! The process-global working directory is never touched; every command gets
//! the tracked directory via `Command::current_dir`.

use std::path::{Path, PathBuf};

use redeploy_env::{Activation, VenvLayout};

use crate::error::{Error, Result};
use crate::process;
use crate::runner::StepDispatch;

/// Name of the version-control executable.
const GIT: &str = "git";

/// Dispatcher that executes steps against the local filesystem and tools.
pub struct LocalDispatch {
    repo_root: PathBuf,
    venv_path: PathBuf,
    cwd: PathBuf,
    layout: Option<VenvLayout>,
    activation: Option<Activation>,
}

impl LocalDispatch {
    /// Create a dispatcher rooted at `repo_root`.
    ///
    /// `venv_path` is the configured venv root, resolved against the
    /// repository root when relative.
    pub fn new(repo_root: impl Into<PathBuf>, venv_path: impl Into<PathBuf>) -> Self {
        let repo_root = repo_root.into();
        Self {
            cwd: repo_root.clone(),
            repo_root,
            venv_path: venv_path.into(),
            layout: None,
            activation: None,
        }
    }

    /// The activation overlay, once the activation step has run.
    pub fn activation(&self) -> Option<&Activation> {
        self.activation.as_ref()
    }
}

impl StepDispatch for LocalDispatch {
    fn change_dir(&mut self, dir: &Path) -> Result<()> {
        if !dir.is_dir() {
            return Err(Error::DirNotFound {
                path: dir.to_path_buf(),
            });
        }
        tracing::debug!(dir = %dir.display(), "changing working directory");
        self.cwd = dir.to_path_buf();
        Ok(())
    }

    fn activate_env(&mut self) -> Result<()> {
        let layout = VenvLayout::locate(&self.repo_root, &self.venv_path)?;
        let activation = Activation::new(&layout)?;
        self.layout = Some(layout);
        self.activation = Some(activation);
        Ok(())
    }

    fn reset_hard(&mut self, remote: &str) -> Result<()> {
        process::run_captured(
            GIT,
            &["reset", "--hard", remote],
            &self.cwd,
            self.activation.as_ref(),
        )?;
        Ok(())
    }

    fn pull(&mut self) -> Result<()> {
        process::run_captured(GIT, &["pull"], &self.cwd, self.activation.as_ref())?;
        Ok(())
    }

    fn install_packages(&mut self, manifest: &Path, upgrade: bool) -> Result<()> {
        let layout = self.layout.as_ref().ok_or(Error::NotActivated)?;
        let activation = self.activation.as_ref().ok_or(Error::NotActivated)?;

        let manifest_path = if manifest.is_absolute() {
            manifest.to_path_buf()
        } else {
            self.cwd.join(manifest)
        };
        if !manifest_path.is_file() {
            return Err(Error::ManifestNotFound {
                path: manifest_path,
            });
        }

        let pip = layout.pip()?;
        process::run_install(&pip, manifest, upgrade, &self.cwd, activation)
    }

    fn cwd(&self) -> &Path {
        &self.cwd
    }
}
