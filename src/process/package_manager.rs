//! Package manager invocations (`remove` / `add`) inside the target package

use crate::core::{MigrationError, StepOutcome};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Client for the package manager CLI
#[derive(Debug, Clone)]
pub struct PackageManager {
    program: String,
    leading_args: Vec<String>,
    cwd: PathBuf,
}

/// Captured result of a package manager run
struct CommandOutput {
    success: bool,
    stderr: String,
}

impl PackageManager {
    /// Create a client from a command line such as `bolt` or `npx bolt`
    pub fn new(command: &str, cwd: impl AsRef<Path>) -> Self {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().unwrap_or_default();
        Self {
            program,
            leading_args: words.collect(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// The executable that must be on PATH
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Phrase the package manager prints when removing a missing dependency
    pub fn not_installed_phrase(dependency: &str) -> String {
        format!("You do not have a dependency named \"{}\" installed", dependency)
    }

    /// Remove a dependency; an already absent dependency is not an error
    pub async fn remove(&self, dependency: &str) -> Result<StepOutcome, MigrationError> {
        let output = self.exec("remove", dependency).await?;
        if output.success {
            info!("Removed {}", dependency);
            return Ok(StepOutcome::Applied);
        }

        if output.stderr.contains(&Self::not_installed_phrase(dependency)) {
            info!("{} was not installed", dependency);
            return Ok(StepOutcome::AlreadySatisfied);
        }

        Err(MigrationError::ExternalTool(format!(
            "Failed to remove {}: {}",
            dependency,
            output.stderr.trim()
        )))
    }

    /// Add a dependency
    pub async fn add(&self, dependency: &str) -> Result<StepOutcome, MigrationError> {
        let output = self.exec("add", dependency).await?;
        if !output.success {
            return Err(MigrationError::ExternalTool(format!(
                "Failed to add {}: {}",
                dependency,
                output.stderr.trim()
            )));
        }

        info!("Added {}", dependency);
        Ok(StepOutcome::Applied)
    }

    async fn exec(&self, subcommand: &str, dependency: &str) -> Result<CommandOutput, MigrationError> {
        debug!(
            "Running {} {} {} in {}",
            self.program,
            subcommand,
            dependency,
            self.cwd.display()
        );

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args([subcommand, dependency])
            .current_dir(&self.cwd)
            .output()
            .await
            .map_err(|e| {
                MigrationError::ExternalTool(format!(
                    "Unable to run command: \"{} {} {}\": {}",
                    self.program, subcommand, dependency, e
                ))
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Write a fake package manager script into `dir`, run through `sh`
    fn fake_bolt(dir: &Path, body: &str) -> String {
        let path = dir.join("fake-bolt.sh");
        std::fs::write(&path, format!("{}\n", body)).unwrap();
        format!("sh {}", path.display())
    }

    #[test]
    fn test_command_line_split() {
        let pm = PackageManager::new("npx bolt", "/tmp");
        assert_eq!(pm.program(), "npx");
        assert_eq!(pm.leading_args, vec!["bolt".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_success() {
        let dir = TempDir::new().unwrap();
        let bolt = fake_bolt(dir.path(), "echo \"$1 $2\" > invoked");
        let pm = PackageManager::new(&bolt, dir.path());

        assert_eq!(pm.remove("@babel/runtime").await.unwrap(), StepOutcome::Applied);
        // Ran inside the target directory
        assert_eq!(
            std::fs::read_to_string(dir.path().join("invoked")).unwrap(),
            "remove @babel/runtime\n"
        );
    }

    #[tokio::test]
    async fn test_remove_not_installed_is_satisfied() {
        let dir = TempDir::new().unwrap();
        let bolt = fake_bolt(
            dir.path(),
            "echo 'error You do not have a dependency named \"@babel/runtime\" installed' >&2; exit 1",
        );
        let pm = PackageManager::new(&bolt, dir.path());

        assert_eq!(
            pm.remove("@babel/runtime").await.unwrap(),
            StepOutcome::AlreadySatisfied
        );
    }

    #[tokio::test]
    async fn test_remove_other_failure() {
        let dir = TempDir::new().unwrap();
        let bolt = fake_bolt(dir.path(), "echo 'network down' >&2; exit 1");
        let pm = PackageManager::new(&bolt, dir.path());

        let err = pm.remove("@babel/runtime").await.unwrap_err();
        assert!(matches!(err, MigrationError::ExternalTool(msg) if msg.contains("network down")));
    }

    #[tokio::test]
    async fn test_add_failure_carries_stderr() {
        let dir = TempDir::new().unwrap();
        let bolt = fake_bolt(dir.path(), "echo 'no such package' >&2; exit 1");
        let pm = PackageManager::new(&bolt, dir.path());

        let err = pm.add("tslib").await.unwrap_err();
        assert!(matches!(err, MigrationError::ExternalTool(msg) if msg.contains("no such package")));
    }

    #[tokio::test]
    async fn test_add_success() {
        let dir = TempDir::new().unwrap();
        let bolt = fake_bolt(dir.path(), "exit 0");
        let pm = PackageManager::new(&bolt, dir.path());
        assert_eq!(pm.add("tslib").await.unwrap(), StepOutcome::Applied);
    }
}
