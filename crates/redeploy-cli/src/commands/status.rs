//! Status command: resolved configuration and environment health

use std::path::Path;

use colored::Colorize;

use redeploy_env::VenvLayout;

use crate::commands::load_config;
use crate::error::Result;

/// Run the status command.
pub fn run_status(root: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(root, config_path)?;

    let venv = VenvLayout::locate(root, &config.venv.path);
    let activatable = venv
        .as_ref()
        .map(|layout| layout.activate_script().is_file())
        .unwrap_or(false);
    let repository = root.join(".git").exists();
    let manifest_found = root.join(&config.packages.manifest).is_file();

    if json {
        let value = serde_json::json!({
            "root": root,
            "remote": config.git.remote,
            "reset_policy": config.git.reset_policy,
            "venv": {
                "path": config.venv.path,
                "found": venv.is_ok(),
                "activatable": activatable,
            },
            "repository": repository,
            "manifest": {
                "path": config.packages.manifest,
                "found": manifest_found,
            },
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Deployment Status".bold());
    println!();
    println!("{}:   {}", "Root".dimmed(), root.display());
    println!("{}: {}", "Remote".dimmed(), config.git.remote.cyan());
    println!(
        "{}: {}",
        "Policy".dimmed(),
        config.git.reset_policy.to_string().cyan()
    );
    println!();

    let mark = |ok: bool| if ok { "+".green() } else { "-".red() };
    println!(
        "  {} virtualenv at {}",
        mark(venv.is_ok()),
        config.venv.path.display()
    );
    println!("  {} activation script", mark(activatable));
    println!("  {} git repository", mark(repository));
    println!(
        "  {} dependency manifest {}",
        mark(manifest_found),
        config.packages.manifest.display()
    );

    Ok(())
}
