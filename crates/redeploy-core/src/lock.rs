//! Single-instance run lock
//!
//! Guards a checkout against two concurrent deployments. The lock is
//! advisory, taken on a marker file in the repository root, and released
//! when the guard drops.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{Error, Result};

/// Lock file name, created in the repository root.
pub const LOCK_FILE: &str = ".redeploy.lock";

/// Held for the duration of a run; releases on drop.
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Acquire the lock for `repo_root`, failing fast if it is already held.
    pub fn acquire(repo_root: &Path) -> Result<Self> {
        let path = repo_root.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&path)?;

        file.try_lock_exclusive()
            .map_err(|_| Error::LockHeld { path: path.clone() })?;

        tracing::debug!(path = %path.display(), "acquired run lock");
        Ok(Self { file, path })
    }

    /// Where the lock file lives.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
