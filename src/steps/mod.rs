//! The migration steps, in execution order

pub mod convert;
pub mod declarations;
pub mod dependencies;
pub mod manifest;
pub mod preconditions;

pub use convert::ConvertStep;
pub use declarations::{FlowIgnoreStep, NpmIgnoreStep, TypescriptUnignoreStep};
pub use dependencies::{AddDependencyStep, RemoveDependencyStep};
pub use manifest::{EntryPointsStep, TypesEntryStep};
pub use preconditions::{CheckPathStep, ConverterCheckStep, ToolPresenceStep};

use crate::core::{BoxedStep, MigrationContext, MigrationError};
use crate::process::PackageManager;
use std::sync::Arc;

/// Build the ordered step list
///
/// Order matters: each step may rely on the side effects or checks of the
/// ones before it (tools are checked before they are invoked).
pub fn migration_steps(ctx: Arc<MigrationContext>) -> Result<Vec<BoxedStep>, MigrationError> {
    let package_manager = PackageManager::new(&ctx.config.package_manager, &ctx.target);

    let steps: Vec<BoxedStep> = vec![
        Box::new(CheckPathStep::new(ctx.clone())),
        Box::new(ToolPresenceStep::new(package_manager.program())),
        Box::new(ConverterCheckStep::new(ctx.clone())),
        Box::new(ConvertStep::new(ctx.clone())?),
        Box::new(RemoveDependencyStep::new(ctx.clone())),
        Box::new(AddDependencyStep::new(ctx.clone())),
        Box::new(NpmIgnoreStep::new(ctx.clone())),
        Box::new(FlowIgnoreStep::new(ctx.clone())),
        Box::new(TypescriptUnignoreStep::new(ctx.clone())),
        Box::new(TypesEntryStep::new(ctx.clone())),
        Box::new(EntryPointsStep::new(ctx)),
    ];

    Ok(steps)
}
