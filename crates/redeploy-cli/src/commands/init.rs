//! Init command: write a default deploy.toml

use std::path::Path;

use colored::Colorize;

use redeploy_core::{CONFIG_FILE, DeployConfig};

use crate::error::{CliError, Result};

/// Run the init command.
pub fn run_init(root: &Path, force: bool) -> Result<()> {
    let path = root.join(CONFIG_FILE);
    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    std::fs::write(&path, DeployConfig::default_document())?;
    println!("{} Wrote {}", "OK".green().bold(), path.display());
    Ok(())
}
