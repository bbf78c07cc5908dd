//! Error types for redeploy-env

use std::path::PathBuf;

/// Result type for redeploy-env operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in redeploy-env operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Virtual environment not found at {path}")]
    VenvNotFound { path: PathBuf },

    #[error("Virtual environment at {venv} has no executable directory {scripts}")]
    ScriptsDirMissing { venv: PathBuf, scripts: PathBuf },

    #[error("Activation script not found at {path}")]
    ActivateScriptMissing { path: PathBuf },

    #[error("Package manager not found in virtual environment: {path}")]
    PipMissing { path: PathBuf },

    #[error("Cannot construct activated PATH: {0}")]
    Path(#[from] std::env::JoinPathsError),
}
