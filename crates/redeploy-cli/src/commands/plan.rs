//! Plan command: print the deployment steps without executing them

use std::path::Path;

use colored::Colorize;

use redeploy_core::Plan;

use crate::commands::load_config;
use crate::error::Result;

/// Run the plan command.
pub fn run_plan(root: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(root, config_path)?;
    let plan = Plan::build(root, &config);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!(
        "{} ({})",
        "Deployment plan".bold(),
        config.git.reset_policy
    );
    println!();
    for (i, step) in plan.steps().iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    Ok(())
}
