//! Run command: execute the deployment sequence

use std::path::Path;

use colored::Colorize;
use is_terminal::IsTerminal;

use redeploy_core::{
    Error, LocalDispatch, Plan, RunLock, RunObserver, Runner, StepKind,
};

use crate::cli::RunArgs;
use crate::commands::load_config;
use crate::error::Result;

/// Observer rendering each step as colored status lines.
struct ConsoleObserver;

impl RunObserver for ConsoleObserver {
    fn step_started(&mut self, index: usize, total: usize, step: &StepKind) {
        println!(
            "{} [{}/{}] {}...",
            "=>".cyan().bold(),
            index + 1,
            total,
            step
        );
    }

    fn step_succeeded(&mut self, _index: usize, _total: usize, step: &StepKind) {
        println!("{} {}", "OK".green().bold(), step);
    }

    fn step_failed(&mut self, _index: usize, _total: usize, step: &StepKind, error: &Error) {
        println!("{} {}: {}", "FAILED".red().bold(), step, error);
    }
}

/// Execute the deployment sequence in `root`.
///
/// Returns the process exit code: 0 when every step succeeded, 1 when the
/// run aborted on a failed step. Both terminal states pause for
/// acknowledgment unless suppressed.
pub fn run_deploy(root: &Path, config_path: Option<&Path>, args: &RunArgs) -> Result<i32> {
    let mut config = load_config(root, config_path)?;
    if let Some(remote) = &args.remote {
        config.git.remote = remote.clone();
    }
    if let Some(policy) = args.reset_policy {
        config.git.reset_policy = policy;
    }

    let _lock = RunLock::acquire(root)?;

    let plan = Plan::build(root, &config);
    println!(
        "{} Deploying {} ({} steps, {})",
        "=>".cyan().bold(),
        root.display(),
        plan.len(),
        config.git.reset_policy
    );
    println!();

    let mut dispatch = LocalDispatch::new(root, config.venv.path.clone());
    let mut observer = ConsoleObserver;
    let report = Runner::new(&plan).run(&mut dispatch, &mut observer);

    println!();
    let code = match &report.failure {
        None => {
            println!("{}", "Deployment completed successfully.".green().bold());
            0
        }
        Some((step, error)) => {
            println!("{} {} ({})", "Deployment failed:".red().bold(), error, step);
            1
        }
    };

    if should_pause(
        config.run.pause_on_exit,
        args.no_pause,
        std::io::stdin().is_terminal(),
    ) {
        pause_for_ack()?;
    }

    Ok(code)
}

/// Whether the terminal acknowledgment should run.
///
/// The acknowledgment fires at most once per run, on both terminal paths,
/// and only for interactive sessions that have not suppressed it.
fn should_pause(configured: bool, no_pause_flag: bool, interactive: bool) -> bool {
    configured && !no_pause_flag && interactive
}

/// Block until the operator acknowledges the outcome.
fn pause_for_ack() -> Result<()> {
    let _: String = dialoguer::Input::new()
        .with_prompt("Press Enter to close")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}
