//! Sequential runner over a step plan
//!
//! The runner walks the plan in order through a [`StepDispatch`]
//! implementation. The first failed step moves the run to its error terminal
//! state; remaining steps are never dispatched, and nothing is retried or
//! rolled back.

use std::path::Path;

use crate::error::{Error, Result};
use crate::step::{Plan, StepKind};

/// Side-effecting operations a step can perform.
///
/// The live implementation is [`crate::LocalDispatch`]; tests substitute
/// recording fakes.
pub trait StepDispatch {
    /// Change the tracked working directory.
    fn change_dir(&mut self, dir: &Path) -> Result<()>;

    /// Validate the virtual environment and capture its activation overlay.
    fn activate_env(&mut self) -> Result<()>;

    /// Discard local changes and move the working copy to `remote`.
    fn reset_hard(&mut self, remote: &str) -> Result<()>;

    /// Pull the latest changes from the default remote.
    fn pull(&mut self) -> Result<()>;

    /// Install packages from `manifest`.
    fn install_packages(&mut self, manifest: &Path, upgrade: bool) -> Result<()>;

    /// The tracked working directory.
    fn cwd(&self) -> &Path;
}

/// Progress callbacks for a run.
///
/// The CLI renders these as colored status lines; tests record them.
pub trait RunObserver {
    fn step_started(&mut self, index: usize, total: usize, step: &StepKind);
    fn step_succeeded(&mut self, index: usize, total: usize, step: &StepKind);
    fn step_failed(&mut self, index: usize, total: usize, step: &StepKind, error: &Error);
}

/// Observer that ignores all events.
pub struct SilentObserver;

impl RunObserver for SilentObserver {
    fn step_started(&mut self, _index: usize, _total: usize, _step: &StepKind) {}
    fn step_succeeded(&mut self, _index: usize, _total: usize, _step: &StepKind) {}
    fn step_failed(&mut self, _index: usize, _total: usize, _step: &StepKind, _error: &Error) {}
}

/// Record of one dispatched step.
#[derive(Debug)]
pub struct StepRecord {
    pub step: StepKind,
    pub success: bool,
}

/// Aggregate result of a run.
#[derive(Debug)]
pub struct RunReport {
    /// Steps that were dispatched, in order. On failure the last record is
    /// the failed step.
    pub executed: Vec<StepRecord>,
    /// The failure that ended the run, if any.
    pub failure: Option<(StepKind, Error)>,
}

impl RunReport {
    /// Whether the run reached its success terminal state.
    pub fn success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Executes a [`Plan`] strictly in order.
pub struct Runner<'a> {
    plan: &'a Plan,
}

impl<'a> Runner<'a> {
    pub fn new(plan: &'a Plan) -> Self {
        Self { plan }
    }

    /// Run every step until the first failure.
    ///
    /// Dispatch stops at the failed step; the tracked working directory is
    /// left wherever the run put it.
    pub fn run(&self, dispatch: &mut dyn StepDispatch, observer: &mut dyn RunObserver) -> RunReport {
        let total = self.plan.len();
        let mut executed = Vec::with_capacity(total);

        for (index, step) in self.plan.steps().iter().enumerate() {
            observer.step_started(index, total, step);
            tracing::debug!(step = %step, index, "dispatching step");

            let result = match step {
                StepKind::ChangeDir { dir } => dispatch.change_dir(dir),
                StepKind::ActivateEnv => dispatch.activate_env(),
                StepKind::ResetHard { remote } => dispatch.reset_hard(remote),
                StepKind::Pull => dispatch.pull(),
                StepKind::InstallPackages { manifest, upgrade } => {
                    dispatch.install_packages(manifest, *upgrade)
                }
            };

            match result {
                Ok(()) => {
                    executed.push(StepRecord {
                        step: step.clone(),
                        success: true,
                    });
                    observer.step_succeeded(index, total, step);
                }
                Err(error) => {
                    executed.push(StepRecord {
                        step: step.clone(),
                        success: false,
                    });
                    observer.step_failed(index, total, step, &error);
                    tracing::warn!(step = %step, %error, "step failed, aborting run");
                    return RunReport {
                        executed,
                        failure: Some((step.clone(), error)),
                    };
                }
            }
        }

        RunReport {
            executed,
            failure: None,
        }
    }
}
