//! Dependency swap steps

use crate::cli::output::code;
use crate::core::{MigrationContext, MigrationError, MigrationStep, StepOutcome};
use crate::process::PackageManager;
use async_trait::async_trait;
use std::sync::Arc;

/// Removes a dependency that the TypeScript build no longer needs
pub struct RemoveDependencyStep {
    package_manager: PackageManager,
    dependency: String,
}

impl RemoveDependencyStep {
    pub fn new(ctx: Arc<MigrationContext>) -> Self {
        Self {
            package_manager: PackageManager::new(&ctx.config.package_manager, &ctx.target),
            dependency: ctx.config.dependencies.remove.clone(),
        }
    }
}

#[async_trait]
impl MigrationStep for RemoveDependencyStep {
    fn title(&self) -> String {
        format!("Removing {} dependency", code(&self.dependency))
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        self.package_manager.remove(&self.dependency).await
    }
}

/// Adds the TypeScript runtime helpers dependency
pub struct AddDependencyStep {
    package_manager: PackageManager,
    dependency: String,
}

impl AddDependencyStep {
    pub fn new(ctx: Arc<MigrationContext>) -> Self {
        Self {
            package_manager: PackageManager::new(&ctx.config.package_manager, &ctx.target),
            dependency: ctx.config.dependencies.add.clone(),
        }
    }
}

#[async_trait]
impl MigrationStep for AddDependencyStep {
    fn title(&self) -> String {
        format!("Adding {} dependency", code(&self.dependency))
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        self.package_manager.add(&self.dependency).await
    }
}
