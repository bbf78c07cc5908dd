//! Activation overlay for external commands
//!
//! A child process cannot mutate its parent's environment, so "activating"
//! the venv means capturing the variables the activate script would set and
//! applying them to every external command spawned for the rest of the run.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::layout::VenvLayout;

/// Environment overlay equivalent to sourcing the venv's activate script.
#[derive(Debug, Clone)]
pub struct Activation {
    venv_root: PathBuf,
    path_value: OsString,
}

impl Activation {
    /// Build the overlay for `layout`.
    ///
    /// Fails if the activation entry point is missing — the closest signal
    /// that the directory is not actually a virtual environment.
    pub fn new(layout: &VenvLayout) -> Result<Self> {
        let script = layout.activate_script();
        if !script.is_file() {
            return Err(Error::ActivateScriptMissing { path: script });
        }

        let mut paths = vec![layout.scripts_dir().to_path_buf()];
        if let Some(current) = env::var_os("PATH") {
            paths.extend(env::split_paths(&current));
        }
        let path_value = env::join_paths(paths)?;

        tracing::debug!(venv = %layout.root().display(), "activated virtual environment");
        Ok(Self {
            venv_root: layout.root().to_path_buf(),
            path_value,
        })
    }

    /// Configure `cmd` to run as if the venv were activated.
    ///
    /// Sets `VIRTUAL_ENV`, prepends the executable directory to `PATH`, and
    /// removes `PYTHONHOME`, matching what the activate script itself does.
    pub fn apply(&self, cmd: &mut Command) {
        cmd.env("VIRTUAL_ENV", &self.venv_root)
            .env("PATH", &self.path_value)
            .env_remove("PYTHONHOME");
    }

    /// The activated venv's root directory.
    pub fn venv_root(&self) -> &Path {
        &self.venv_root
    }
}
