//! Deployment runner core
//!
//! Coordinates the deployment sequence for a Python application checkout:
//! activate its virtual environment, force-synchronize the working directory
//! with its remote repository, and reinstall dependency packages — strictly
//! in order, aborting on the first failed step.
//!
//! The sequence itself is pure data (a [`Plan`] of [`StepKind`]s); the
//! [`Runner`] walks it through a [`StepDispatch`] implementation, which is a
//! trait so tests can substitute recording fakes for the live
//! [`LocalDispatch`].

pub mod config;
pub mod dispatch;
pub mod error;
pub mod lock;
pub mod process;
pub mod runner;
pub mod step;

pub use config::{CONFIG_FILE, DeployConfig, ResetPolicy};
pub use dispatch::LocalDispatch;
pub use error::{Error, Result};
pub use lock::RunLock;
pub use runner::{RunObserver, RunReport, Runner, SilentObserver, StepDispatch, StepRecord};
pub use step::{Plan, StepKind};
