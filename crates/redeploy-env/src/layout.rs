//! Platform-aware virtual environment layout
//!
//! A venv keeps its executables under `Scripts/` on Windows and `bin/`
//! everywhere else. All lookups go through [`VenvLayout`] so the rest of the
//! tool never spells out platform paths.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[cfg(windows)]
const SCRIPTS_DIR: &str = "Scripts";
#[cfg(not(windows))]
const SCRIPTS_DIR: &str = "bin";

#[cfg(windows)]
const ACTIVATE_SCRIPT: &str = "activate.bat";
#[cfg(not(windows))]
const ACTIVATE_SCRIPT: &str = "activate";

/// Name of the executable directory inside a venv on this platform.
pub fn scripts_dir_name() -> &'static str {
    SCRIPTS_DIR
}

fn exe(name: &str) -> String {
    #[cfg(windows)]
    {
        format!("{name}.exe")
    }
    #[cfg(not(windows))]
    {
        name.to_string()
    }
}

/// Resolved on-disk layout of a Python virtual environment.
#[derive(Debug, Clone)]
pub struct VenvLayout {
    root: PathBuf,
    scripts: PathBuf,
}

impl VenvLayout {
    /// Locate a venv at `path`, resolving relative paths against `base`.
    ///
    /// Verifies that the venv root and its executable directory exist.
    pub fn locate(base: &Path, path: &Path) -> Result<Self> {
        let root = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        };

        if !root.is_dir() {
            return Err(Error::VenvNotFound { path: root });
        }

        let scripts = root.join(SCRIPTS_DIR);
        if !scripts.is_dir() {
            return Err(Error::ScriptsDirMissing { venv: root, scripts });
        }

        tracing::debug!(venv = %root.display(), "located virtual environment");
        Ok(Self { root, scripts })
    }

    /// The venv root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The executable directory (`bin/` or `Scripts/`).
    pub fn scripts_dir(&self) -> &Path {
        &self.scripts
    }

    /// Path to the conventional activation entry point.
    pub fn activate_script(&self) -> PathBuf {
        self.scripts.join(ACTIVATE_SCRIPT)
    }

    /// Path to the venv's interpreter.
    pub fn python(&self) -> PathBuf {
        self.scripts.join(exe("python"))
    }

    /// Path to the venv's package manager, verified to exist.
    pub fn pip(&self) -> Result<PathBuf> {
        let pip = self.scripts.join(exe("pip"));
        if pip.is_file() {
            Ok(pip)
        } else {
            Err(Error::PipMissing { path: pip })
        }
    }
}
