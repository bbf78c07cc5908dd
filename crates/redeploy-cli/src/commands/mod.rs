//! Command implementations

mod init;
mod plan;
mod run;
mod status;

pub use init::run_init;
pub use plan::run_plan;
pub use run::run_deploy;
pub use status::run_status;

use std::path::Path;

use redeploy_core::{CONFIG_FILE, DeployConfig};

use crate::error::{CliError, Result};

/// Resolve and load the deployment config for `root`.
///
/// An explicitly passed path must exist; the default `deploy.toml` is
/// optional and falls back to the built-in defaults.
pub(crate) fn load_config(root: &Path, explicit: Option<&Path>) -> Result<DeployConfig> {
    match explicit {
        Some(path) => {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            };
            if !path.is_file() {
                return Err(CliError::user(format!(
                    "Config not found: {}",
                    path.display()
                )));
            }
            let content = std::fs::read_to_string(&path)?;
            Ok(DeployConfig::parse(&content)?)
        }
        None => Ok(DeployConfig::load(&root.join(CONFIG_FILE))?),
    }
}
