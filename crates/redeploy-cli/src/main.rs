//! Deployment runner CLI
//!
//! The command-line interface for synchronizing a checkout with its remote
//! repository and reinstalling its dependencies.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, RunArgs};
use error::Result;

fn main() {
    match run() {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let root = std::env::current_dir()?;
    let config = cli.config.as_deref();

    match &cli.command {
        // A bare invocation deploys, like the scripts this tool replaces.
        None => commands::run_deploy(&root, config, &RunArgs::default()),
        Some(Commands::Run(args)) => commands::run_deploy(&root, config, args),
        Some(Commands::Plan { json }) => commands::run_plan(&root, config, *json).map(|()| 0),
        Some(Commands::Status { json }) => commands::run_status(&root, config, *json).map(|()| 0),
        Some(Commands::Init { force }) => commands::run_init(&root, *force).map(|()| 0),
    }
}
