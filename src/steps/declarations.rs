//! Declaration file steps: Flow index, TypeScript ignore list, .npmignore

use crate::cli::output::code;
use crate::core::{MigrationContext, MigrationError, MigrationStep, StepOutcome};
use crate::files::{io, ignore_block, DeclarationIndex, IgnoreList, PackageManifest};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Entry appended to .npmignore
const NPMIGNORE_ENTRY: &str = "index.ts";

/// Keeps the generated index.ts out of the published package
pub struct NpmIgnoreStep {
    ctx: Arc<MigrationContext>,
}

impl NpmIgnoreStep {
    pub fn new(ctx: Arc<MigrationContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl MigrationStep for NpmIgnoreStep {
    fn title(&self) -> String {
        format!("Adding {} to {}", code(NPMIGNORE_ENTRY), code(".npmignore"))
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        let path = self.ctx.npmignore_path();
        let contents = io::read_text(&path).await?;

        if contents.contains(NPMIGNORE_ENTRY) {
            return Ok(StepOutcome::AlreadySatisfied);
        }

        io::append_text(
            &path,
            &format!("\n# Ignoring generated {0}\n{0}", NPMIGNORE_ENTRY),
        )
        .await?;
        Ok(StepOutcome::Applied)
    }
}

/// Declares the converted package as `any` in the Flow declaration index
pub struct FlowIgnoreStep {
    ctx: Arc<MigrationContext>,
}

impl FlowIgnoreStep {
    pub fn new(ctx: Arc<MigrationContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl MigrationStep for FlowIgnoreStep {
    fn title(&self) -> String {
        "Ignoring component in flow".to_string()
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        let manifest = PackageManifest::load(&self.ctx.manifest_path()).await?;
        let name = manifest.name()?;

        let path = self.ctx.flow_index_path();
        let mut index = DeclarationIndex::parse(&io::read_text(&path).await?);

        if !index.insert(ignore_block(name)) {
            return Ok(StepOutcome::AlreadySatisfied);
        }

        io::rewrite_text(&path, &index.render()).await?;
        info!("Declared {} in {}", name, path.display());
        Ok(StepOutcome::Applied)
    }
}

/// Removes the converted package from the TypeScript ignore list
pub struct TypescriptUnignoreStep {
    ctx: Arc<MigrationContext>,
}

impl TypescriptUnignoreStep {
    pub fn new(ctx: Arc<MigrationContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl MigrationStep for TypescriptUnignoreStep {
    fn title(&self) -> String {
        "Un-ignoring component in typescript".to_string()
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        let manifest = PackageManifest::load(&self.ctx.manifest_path()).await?;
        let name = manifest.name()?;

        let path = self.ctx.typescript_ignore_list_path();
        let mut list = IgnoreList::parse(&io::read_text(&path).await?);

        if !list.remove(name) {
            return Ok(StepOutcome::AlreadySatisfied);
        }

        io::rewrite_text(&path, &list.render()).await?;
        info!("Removed {} from {}", name, path.display());
        Ok(StepOutcome::Applied)
    }
}
