//! Deployment manifest parsing for deploy.toml
//!
//! Every field carries a default for the conventional checkout layout (venv
//! one level up, `origin` remote, `requirements.txt` manifest, upgrade
//! installs, pause before exit), so a missing config file is equivalent to
//! an empty one.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the deployment manifest at the repository root
pub const CONFIG_FILE: &str = "deploy.toml";

fn default_venv_path() -> PathBuf {
    PathBuf::from("../venv")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_manifest() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_true() -> bool {
    true
}

/// When the hard reset runs relative to the pull.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetPolicy {
    /// Reset once, before the pull.
    #[default]
    BeforePull,
    /// Reset before the pull and again after it, discarding anything the
    /// pull itself may have left diverged.
    BeforeAndAfter,
}

impl FromStr for ResetPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "before-pull" => Ok(Self::BeforePull),
            "before-and-after" => Ok(Self::BeforeAndAfter),
            other => Err(Error::InvalidResetPolicy {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ResetPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BeforePull => write!(f, "before-pull"),
            Self::BeforeAndAfter => write!(f, "before-and-after"),
        }
    }
}

/// `[venv]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenvSection {
    /// Venv root, resolved against the repository root when relative
    #[serde(default = "default_venv_path")]
    pub path: PathBuf,
}

impl Default for VenvSection {
    fn default() -> Self {
        Self {
            path: default_venv_path(),
        }
    }
}

/// `[git]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitSection {
    /// Remote the hard reset targets
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Whether the reset runs once or around the pull
    #[serde(default)]
    pub reset_policy: ResetPolicy,
}

impl Default for GitSection {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            reset_policy: ResetPolicy::default(),
        }
    }
}

/// `[packages]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagesSection {
    /// Dependency manifest, relative to the repository root
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Pass `--upgrade` to the install
    #[serde(default = "default_true")]
    pub upgrade: bool,
}

impl Default for PackagesSection {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            upgrade: true,
        }
    }
}

/// `[run]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSection {
    /// Block for acknowledgment before the process exits
    #[serde(default = "default_true")]
    pub pause_on_exit: bool,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            pause_on_exit: true,
        }
    }
}

/// Deployment configuration parsed from deploy.toml
///
/// # Example
///
/// ```
/// use redeploy_core::{DeployConfig, ResetPolicy};
///
/// let config = DeployConfig::parse(r#"
/// [git]
/// remote = "upstream"
/// reset_policy = "before-and-after"
/// "#).unwrap();
///
/// assert_eq!(config.git.remote, "upstream");
/// assert_eq!(config.git.reset_policy, ResetPolicy::BeforeAndAfter);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Virtual environment settings
    #[serde(default)]
    pub venv: VenvSection,

    /// Source-control synchronization settings
    #[serde(default)]
    pub git: GitSection,

    /// Package install settings
    #[serde(default)]
    pub packages: PackagesSection,

    /// Run behavior settings
    #[serde(default)]
    pub run: RunSection,
}

impl DeployConfig {
    /// Parse a configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: DeployConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load the configuration from `path`.
    ///
    /// A missing file yields the defaults; a present but malformed file is
    /// an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no deployment config, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Render the default configuration as a commented TOML document, used
    /// by `redeploy init`.
    pub fn default_document() -> String {
        concat!(
            "# Deployment configuration for redeploy\n",
            "\n",
            "[venv]\n",
            "# Virtual environment root, relative to the repository root\n",
            "path = \"../venv\"\n",
            "\n",
            "[git]\n",
            "remote = \"origin\"\n",
            "# \"before-pull\" resets once; \"before-and-after\" repeats the hard\n",
            "# reset after the pull\n",
            "reset_policy = \"before-pull\"\n",
            "\n",
            "[packages]\n",
            "manifest = \"requirements.txt\"\n",
            "upgrade = true\n",
            "\n",
            "[run]\n",
            "pause_on_exit = true\n",
        )
        .to_string()
    }
}
