//! Error types for redeploy-core

use std::path::PathBuf;

/// Result type for redeploy-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in redeploy-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A directory-change step targeted a missing directory
    #[error("Directory not found: {path}")]
    DirNotFound { path: PathBuf },

    /// The dependency manifest is missing from the checkout
    #[error("Dependency manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// An install step ran before the environment was activated
    #[error("Virtual environment is not activated")]
    NotActivated,

    /// An external command could not be launched at all
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external command exited non-zero
    #[error("{program} failed (exit code {code}): {stderr}")]
    CommandFailed {
        program: String,
        code: i32,
        stderr: String,
    },

    /// The package install exited non-zero; its output streamed live
    #[error("Package install failed (exit code {code}); check the output above")]
    InstallFailed { code: i32 },

    /// Unrecognized reset policy name
    #[error("Invalid reset policy: {value} (expected \"before-pull\" or \"before-and-after\")")]
    InvalidResetPolicy { value: String },

    /// Malformed deployment config
    #[error("Failed to parse deployment config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Another run holds the lock for this checkout
    #[error("Another deployment is already running (lock held at {path})")]
    LockHeld { path: PathBuf },

    /// Virtual environment error from redeploy-env
    #[error(transparent)]
    Env(#[from] redeploy_env::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
