//! Step plan construction
//!
//! A plan is the ordered list of external-tool steps a deployment run
//! executes. Plans are pure data: building one touches neither the
//! filesystem nor any external tool.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{DeployConfig, ResetPolicy};

/// A single operation in the deployment sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StepKind {
    /// Change the tracked working directory.
    ChangeDir { dir: PathBuf },
    /// Validate the virtual environment and capture its activation overlay.
    ActivateEnv,
    /// Discard local changes and move the working copy to the remote.
    ResetHard { remote: String },
    /// Pull the latest changes from the default remote.
    Pull,
    /// Install/upgrade packages from the dependency manifest.
    InstallPackages { manifest: PathBuf, upgrade: bool },
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChangeDir { dir } => write!(f, "enter {}", dir.display()),
            Self::ActivateEnv => write!(f, "activate virtual environment"),
            Self::ResetHard { remote } => write!(f, "hard reset to {remote}"),
            Self::Pull => write!(f, "pull latest changes"),
            Self::InstallPackages { manifest, upgrade } => {
                if *upgrade {
                    write!(f, "install packages from {} (upgrade)", manifest.display())
                } else {
                    write!(f, "install packages from {}", manifest.display())
                }
            }
        }
    }
}

/// The ordered deployment step sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    steps: Vec<StepKind>,
}

impl Plan {
    /// Build the step sequence for `config`, rooted at `repo_root`.
    ///
    /// The sequence mirrors the deployment workflow: enter the venv's
    /// executable directory, activate, return to the repository root,
    /// synchronize with the remote, reinstall packages. Under
    /// [`ResetPolicy::BeforeAndAfter`] the hard reset is repeated after the
    /// pull.
    pub fn build(repo_root: &Path, config: &DeployConfig) -> Self {
        let venv_root = if config.venv.path.is_absolute() {
            config.venv.path.clone()
        } else {
            repo_root.join(&config.venv.path)
        };
        let scripts = venv_root.join(redeploy_env::scripts_dir_name());

        let mut steps = vec![
            StepKind::ChangeDir { dir: scripts },
            StepKind::ActivateEnv,
            StepKind::ChangeDir {
                dir: repo_root.to_path_buf(),
            },
            StepKind::ResetHard {
                remote: config.git.remote.clone(),
            },
            StepKind::Pull,
        ];

        if config.git.reset_policy == ResetPolicy::BeforeAndAfter {
            steps.push(StepKind::ResetHard {
                remote: config.git.remote.clone(),
            });
        }

        steps.push(StepKind::InstallPackages {
            manifest: config.packages.manifest.clone(),
            upgrade: config.packages.upgrade,
        });

        Self { steps }
    }

    /// The steps, in execution order.
    pub fn steps(&self) -> &[StepKind] {
        &self.steps
    }

    /// Number of steps in the plan.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps. Built plans never are.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn count(plan: &Plan, pred: impl Fn(&StepKind) -> bool) -> usize {
        plan.steps().iter().filter(|s| pred(s)).count()
    }

    #[test]
    fn test_before_pull_resets_exactly_once_before_the_pull() {
        let config = DeployConfig::default();
        let plan = Plan::build(Path::new("/srv/app"), &config);

        assert_eq!(plan.len(), 6);
        assert_eq!(count(&plan, |s| matches!(s, StepKind::ResetHard { .. })), 1);
        assert_eq!(count(&plan, |s| matches!(s, StepKind::Pull)), 1);

        let reset = plan
            .steps()
            .iter()
            .position(|s| matches!(s, StepKind::ResetHard { .. }))
            .unwrap();
        let pull = plan
            .steps()
            .iter()
            .position(|s| matches!(s, StepKind::Pull))
            .unwrap();
        assert!(reset < pull);
    }

    #[test]
    fn test_before_and_after_resets_around_the_pull() {
        let mut config = DeployConfig::default();
        config.git.reset_policy = ResetPolicy::BeforeAndAfter;
        let plan = Plan::build(Path::new("/srv/app"), &config);

        assert_eq!(plan.len(), 7);
        let resets: Vec<usize> = plan
            .steps()
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, StepKind::ResetHard { .. }))
            .map(|(i, _)| i)
            .collect();
        let pull = plan
            .steps()
            .iter()
            .position(|s| matches!(s, StepKind::Pull))
            .unwrap();

        assert_eq!(resets.len(), 2);
        assert!(resets[0] < pull && pull < resets[1]);
    }

    #[test]
    fn test_both_policies_install_exactly_once_and_last() {
        for policy in [ResetPolicy::BeforePull, ResetPolicy::BeforeAndAfter] {
            let mut config = DeployConfig::default();
            config.git.reset_policy = policy;
            let plan = Plan::build(Path::new("/srv/app"), &config);

            assert_eq!(
                count(&plan, |s| matches!(s, StepKind::InstallPackages { .. })),
                1
            );
            assert!(matches!(
                plan.steps().last(),
                Some(StepKind::InstallPackages { .. })
            ));
        }
    }

    #[test]
    fn test_plan_returns_to_repo_root_before_git_steps() {
        let root = Path::new("/srv/app");
        let plan = Plan::build(root, &DeployConfig::default());

        assert_eq!(
            plan.steps()[2],
            StepKind::ChangeDir {
                dir: root.to_path_buf()
            }
        );
        assert!(matches!(plan.steps()[3], StepKind::ResetHard { .. }));
    }

    #[test]
    fn test_venv_scripts_dir_resolved_against_root() {
        let plan = Plan::build(Path::new("/srv/app"), &DeployConfig::default());

        let StepKind::ChangeDir { dir } = &plan.steps()[0] else {
            panic!("first step should enter the venv scripts directory");
        };
        assert!(dir.starts_with("/srv/app"));
        assert!(dir.ends_with(redeploy_env::scripts_dir_name()));
    }

    #[test]
    fn test_remote_name_flows_into_reset() {
        let mut config = DeployConfig::default();
        config.git.remote = "upstream".to_string();
        let plan = Plan::build(Path::new("/srv/app"), &config);

        assert!(plan.steps().iter().any(|s| matches!(
            s,
            StepKind::ResetHard { remote } if remote == "upstream"
        )));
    }
}
