//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use redeploy_core::ResetPolicy;

/// Deployment runner - synchronize a checkout and reinstall its dependencies
#[derive(Parser, Debug)]
#[command(name = "redeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the deployment config (defaults to deploy.toml in the current
    /// directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run; a bare invocation behaves like `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Execute the deployment sequence
    ///
    /// Activates the virtual environment, hard-resets the checkout to the
    /// remote, pulls, and reinstalls dependency packages. This is also what
    /// a bare `redeploy` invocation runs.
    Run(RunArgs),

    /// Print the deployment steps without executing them
    Plan {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved configuration and environment health
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write a default deploy.toml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Override the configured remote
    #[arg(long)]
    pub remote: Option<String>,

    /// Override the reset policy (before-pull or before-and-after)
    #[arg(long)]
    pub reset_policy: Option<ResetPolicy>,

    /// Skip the final pause for acknowledgment
    #[arg(long)]
    pub no_pause: bool,
}
