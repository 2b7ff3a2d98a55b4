//! External tool checks: presence on PATH and minimum version

use crate::core::MigrationError;
use semver::{Version, VersionReq};
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Locate an executable on PATH
pub fn find_on_path(tool: &str) -> Result<PathBuf, MigrationError> {
    which::which(tool).map_err(|e| {
        debug!("{} not found on PATH: {}", tool, e);
        MigrationError::MissingDependency {
            tool: tool.to_string(),
        }
    })
}

/// Version requirement for an external tool
#[derive(Debug, Clone)]
pub struct VersionCheck {
    pub tool: String,
    pub required: String,
    pub upgrade_command: String,
}

impl VersionCheck {
    pub fn new(tool: impl Into<String>, required: impl Into<String>, upgrade_command: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            required: required.into(),
            upgrade_command: upgrade_command.into(),
        }
    }

    /// Run `<tool> --version` and check the reported version
    pub async fn probe(&self) -> Result<Version, MigrationError> {
        let command = format!("{} --version", self.tool);
        let output = Command::new(&self.tool)
            .arg("--version")
            .output()
            .await
            .map_err(|e| {
                MigrationError::ExternalTool(format!("Unable to run command: \"{}\": {}", command, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MigrationError::ExternalTool(format!(
                "Unable to run command: \"{}\": {}",
                command,
                stderr.trim()
            )));
        }

        let reported = String::from_utf8_lossy(&output.stdout);
        debug!("{} reported version {:?}", self.tool, reported);
        self.evaluate(&reported)
    }

    /// Check a reported version string against the requirement
    pub fn evaluate(&self, reported: &str) -> Result<Version, MigrationError> {
        let reported = reported.trim().to_lowercase();

        let requirement = VersionReq::parse(&self.required)
            .map_err(|e| MigrationError::Config(format!("Invalid version requirement '{}': {}", self.required, e)))?;

        // Releases that predate --version print an argument error instead
        if reported.contains("error") {
            return Err(self.mismatch(reported));
        }

        // `v0.1.9` and `=0.1.9` are accepted spellings of a plain version
        let bare = reported
            .strip_prefix('v')
            .or_else(|| reported.strip_prefix('='))
            .unwrap_or(reported.as_str());

        let version = Version::parse(bare.trim_start()).map_err(|_| MigrationError::VersionFormat {
            tool: self.tool.clone(),
            required: self.required.clone(),
            received: reported.clone(),
        })?;

        if !requirement.matches(&version) {
            return Err(self.mismatch(reported));
        }

        Ok(version)
    }

    fn mismatch(&self, current: String) -> MigrationError {
        MigrationError::VersionMismatch {
            tool: self.tool.clone(),
            required: self.required.clone(),
            current,
            upgrade: self.upgrade_command.clone(),
        }
    }
}
