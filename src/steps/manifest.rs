//! package.json steps

use crate::cli::output::code;
use crate::core::{MigrationContext, MigrationError, MigrationStep, StepOutcome};
use crate::files::{EntryUpdate, PackageManifest};
use async_trait::async_trait;
use std::sync::Arc;

/// Adds the `types` entry, refusing to replace a different one
pub struct TypesEntryStep {
    ctx: Arc<MigrationContext>,
}

impl TypesEntryStep {
    pub fn new(ctx: Arc<MigrationContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl MigrationStep for TypesEntryStep {
    fn title(&self) -> String {
        format!("Adding {} entry to {}", code("types"), code("package.json"))
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        let mut manifest = PackageManifest::load(&self.ctx.manifest_path()).await?;

        match manifest.set_if_absent("types", &self.ctx.config.manifest.types_entry)? {
            EntryUpdate::Unchanged => Ok(StepOutcome::AlreadySatisfied),
            EntryUpdate::Inserted => {
                manifest.save().await?;
                Ok(StepOutcome::Applied)
            }
        }
    }
}

/// Points `main`, `module` and the source entry at the TypeScript build
pub struct EntryPointsStep {
    ctx: Arc<MigrationContext>,
}

impl EntryPointsStep {
    pub fn new(ctx: Arc<MigrationContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl MigrationStep for EntryPointsStep {
    fn title(&self) -> String {
        format!("Adding entry points to {}", code("package.json"))
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        let entries = &self.ctx.config.manifest;
        let mut manifest = PackageManifest::load(&self.ctx.manifest_path()).await?;

        manifest.set("main", entries.main_entry.as_str());
        manifest.set("module", entries.module_entry.as_str());
        manifest.set(&entries.source_key, entries.source_entry.as_str());

        manifest.save().await?;
        Ok(StepOutcome::Applied)
    }
}
