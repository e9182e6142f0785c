//! # Office Configuration
//!
//! TOML-backed configuration for the head office.
//!
//! ## Configuration File Format
//! ```toml
//! # office.toml
//! runtime_dir = "run"            # FIFOs live here
//! branch_exe = "branchd"         # branch executable to spawn
//! poll_timeout_ms = 500          # reply-loop readiness bound
//! grace_period_ms = 1000         # shutdown drain window
//!
//! [[branch]]
//! name = "Ahmedabad"
//!
//! [[branch]]
//! name = "Surat"
//! data_dir = "/var/lib/chainsim/surat"   # optional; defaults to data_<name>
//! ```
//!
//! With no file at all, [`OfficeConfig::default`] yields the canonical
//! three-branch demo roster.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{OfficeError, OfficeResult};

fn default_runtime_dir() -> PathBuf {
    PathBuf::from("run")
}

fn default_branch_exe() -> PathBuf {
    PathBuf::from("branchd")
}

fn default_poll_timeout_ms() -> u64 {
    500
}

fn default_grace_period_ms() -> u64 {
    1000
}

// =============================================================================
// Branch Spec
// =============================================================================

/// One configured branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchSpec {
    /// Branch identifier; also tags every reply line.
    pub name: String,

    /// Snapshot directory. Defaults to `data_<name>` in the working dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl BranchSpec {
    pub fn named(name: impl Into<String>) -> Self {
        BranchSpec {
            name: name.into(),
            data_dir: None,
        }
    }

    /// Effective data directory for this branch.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("data_{}", self.name)))
    }
}

// =============================================================================
// Office Config
// =============================================================================

/// Head-office configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficeConfig {
    /// Directory holding the per-branch FIFOs.
    #[serde(default = "default_runtime_dir")]
    pub runtime_dir: PathBuf,

    /// Branch executable to spawn.
    #[serde(default = "default_branch_exe")]
    pub branch_exe: PathBuf,

    /// Bounded wait of one reply-loop iteration.
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,

    /// Shutdown drain window after broadcasting EXIT.
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,

    /// Branch roster, in registration order.
    #[serde(default, rename = "branch")]
    pub branches: Vec<BranchSpec>,
}

impl Default for OfficeConfig {
    /// The demo roster the simulation has always shipped with.
    fn default() -> Self {
        OfficeConfig {
            runtime_dir: default_runtime_dir(),
            branch_exe: default_branch_exe(),
            poll_timeout_ms: default_poll_timeout_ms(),
            grace_period_ms: default_grace_period_ms(),
            branches: vec![
                BranchSpec::named("Ahmedabad"),
                BranchSpec::named("Surat"),
                BranchSpec::named("Vadodara"),
            ],
        }
    }
}

impl OfficeConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> OfficeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: OfficeConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects rosters the spawn loop cannot serve.
    pub fn validate(&self) -> OfficeResult<()> {
        if self.branches.is_empty() {
            return Err(OfficeError::InvalidConfig(
                "at least one branch is required".into(),
            ));
        }
        for (i, spec) in self.branches.iter().enumerate() {
            if spec.name.is_empty() || spec.name.contains(char::is_whitespace) {
                return Err(OfficeError::InvalidConfig(format!(
                    "branch name {:?} must be non-empty and whitespace-free",
                    spec.name
                )));
            }
            if self.branches[..i].iter().any(|b| b.name == spec.name) {
                return Err(OfficeError::InvalidConfig(format!(
                    "duplicate branch name: {}",
                    spec.name
                )));
            }
        }
        Ok(())
    }

    /// Path of a branch's command FIFO (office → branch).
    pub fn command_fifo(&self, branch: &str) -> PathBuf {
        self.runtime_dir.join(format!("cmd_{branch}.fifo"))
    }

    /// Path of a branch's reply FIFO (branch → office).
    pub fn reply_fifo(&self, branch: &str) -> PathBuf {
        self.runtime_dir.join(format!("reply_{branch}.fifo"))
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_is_the_demo_trio() {
        let config = OfficeConfig::default();
        let names: Vec<_> = config.branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Ahmedabad", "Surat", "Vadodara"]);
        config.validate().unwrap();
    }

    #[test]
    fn parses_toml_with_partial_fields() {
        let config: OfficeConfig = toml::from_str(
            r#"
            runtime_dir = "/tmp/chainsim"

            [[branch]]
            name = "Rajkot"

            [[branch]]
            name = "Surat"
            data_dir = "/var/lib/chainsim/surat"
            "#,
        )
        .unwrap();

        assert_eq!(config.runtime_dir, PathBuf::from("/tmp/chainsim"));
        assert_eq!(config.poll_timeout_ms, 500); // default
        assert_eq!(config.branches.len(), 2);
        assert_eq!(config.branches[0].data_dir(), PathBuf::from("data_Rajkot"));
        assert_eq!(
            config.branches[1].data_dir(),
            PathBuf::from("/var/lib/chainsim/surat")
        );
    }

    #[test]
    fn fifo_paths_follow_the_naming_convention() {
        let config = OfficeConfig::default();
        assert_eq!(
            config.command_fifo("Surat"),
            PathBuf::from("run/cmd_Surat.fifo")
        );
        assert_eq!(
            config.reply_fifo("Surat"),
            PathBuf::from("run/reply_Surat.fifo")
        );
    }

    #[test]
    fn validation_rejects_bad_rosters() {
        let mut config = OfficeConfig::default();
        config.branches.push(BranchSpec::named("Surat"));
        assert!(matches!(
            config.validate(),
            Err(OfficeError::InvalidConfig(_))
        ));

        let empty = OfficeConfig {
            branches: Vec::new(),
            ..OfficeConfig::default()
        };
        assert!(empty.validate().is_err());

        let spaced = OfficeConfig {
            branches: vec![BranchSpec::named("New Delhi")],
            ..OfficeConfig::default()
        };
        assert!(spaced.validate().is_err());
    }
}
