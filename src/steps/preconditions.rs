//! Precondition steps: target path and external tools

use crate::cli::output::code;
use crate::core::{MigrationContext, MigrationError, MigrationStep, StepOutcome};
use crate::process::{find_on_path, VersionCheck};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::info;

/// Validates that exactly one argument names an existing directory
pub struct CheckPathStep {
    ctx: Arc<MigrationContext>,
}

impl CheckPathStep {
    pub fn new(ctx: Arc<MigrationContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl MigrationStep for CheckPathStep {
    fn title(&self) -> String {
        "Checking path".to_string()
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        if self.ctx.args.len() != 1 {
            return Err(MigrationError::InvalidInput(format!(
                "expected exactly one [path] argument, got {}",
                self.ctx.args.len()
            )));
        }

        let path = &self.ctx.target;
        if path.as_os_str().is_empty() {
            return Err(MigrationError::InvalidInput(
                "unable to find [path] argument".to_string(),
            ));
        }

        // lstat: a symlink to a directory is not accepted as the package itself
        let metadata = tokio::fs::symlink_metadata(path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                MigrationError::NotFound(path.clone())
            } else {
                MigrationError::Read {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        if !metadata.is_dir() {
            return Err(MigrationError::InvalidInput(format!(
                "Provided path is not a directory \"{}\"",
                code(path.display())
            )));
        }

        info!("Target package: {}", path.display());
        Ok(StepOutcome::AlreadySatisfied)
    }
}

/// Fails if a tool is not on PATH
pub struct ToolPresenceStep {
    tool: String,
}

impl ToolPresenceStep {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }
}

#[async_trait]
impl MigrationStep for ToolPresenceStep {
    fn title(&self) -> String {
        format!("Checking prerequisite: {}", code(&self.tool))
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        let found = find_on_path(&self.tool)?;
        info!("Found {} at {}", self.tool, found.display());
        Ok(StepOutcome::AlreadySatisfied)
    }
}

/// Checks the converter is on PATH and recent enough
pub struct ConverterCheckStep {
    check: VersionCheck,
}

impl ConverterCheckStep {
    pub fn new(ctx: Arc<MigrationContext>) -> Self {
        let converter = &ctx.config.converter;
        Self {
            check: VersionCheck::new(
                converter.program.clone(),
                converter.min_version.clone(),
                converter.upgrade_command.clone(),
            ),
        }
    }
}

#[async_trait]
impl MigrationStep for ConverterCheckStep {
    fn title(&self) -> String {
        format!("Checking prerequisite: {}", code(&self.check.tool))
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        find_on_path(&self.check.tool)?;
        let version = self.check.probe().await?;
        info!("{} {} satisfies {}", self.check.tool, version, self.check.required);
        Ok(StepOutcome::AlreadySatisfied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MigrationConfig;
    use tempfile::TempDir;

    fn check_path(args: Vec<String>) -> CheckPathStep {
        CheckPathStep::new(Arc::new(MigrationContext::from_args(
            args,
            MigrationConfig::default(),
        )))
    }

    #[tokio::test]
    async fn test_directory_passes() {
        let dir = TempDir::new().unwrap();
        let step = check_path(vec![dir.path().to_string_lossy().into_owned()]);
        assert_eq!(step.run().await.unwrap(), StepOutcome::AlreadySatisfied);
    }

    #[tokio::test]
    async fn test_no_argument_is_invalid_input() {
        let step = check_path(vec![]);
        assert!(matches!(step.run().await, Err(MigrationError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_two_arguments_is_invalid_input() {
        let step = check_path(vec!["a".to_string(), "b".to_string()]);
        assert!(matches!(step.run().await, Err(MigrationError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_blank_argument_is_invalid_input() {
        let step = check_path(vec!["   ".to_string()]);
        assert!(matches!(step.run().await, Err(MigrationError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_missing_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let step = check_path(vec![missing.to_string_lossy().into_owned()]);
        assert!(matches!(step.run().await, Err(MigrationError::NotFound(p)) if p == missing));
    }

    #[tokio::test]
    async fn test_file_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("package.json");
        std::fs::write(&file, "{}").unwrap();

        let step = check_path(vec![file.to_string_lossy().into_owned()]);
        let err = step.run().await.unwrap_err();
        assert!(matches!(err, MigrationError::InvalidInput(msg) if msg.contains("not a directory")));
    }

    #[tokio::test]
    async fn test_missing_tool() {
        let step = ToolPresenceStep::new("nonexistent-tool-binary-12345");
        assert!(step.title().contains("nonexistent-tool-binary-12345"));
        assert!(matches!(
            step.run().await,
            Err(MigrationError::MissingDependency { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_converter() {
        let mut config = MigrationConfig::default();
        config.converter.program = "nonexistent-converter-binary-12345".to_string();
        let step = ConverterCheckStep::new(Arc::new(MigrationContext::for_target(".", config)));

        assert!(matches!(
            step.run().await,
            Err(MigrationError::MissingDependency { tool }) if tool == "nonexistent-converter-binary-12345"
        ));
    }
}
