//! Conversion step - drives the converter through its prompts

use crate::cli::output::code;
use crate::core::{MigrationContext, MigrationError, MigrationStep, StepOutcome};
use crate::process::{InteractiveDriver, PromptTable};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Generates tsconfig and converts the package's sources
pub struct ConvertStep {
    driver: InteractiveDriver,
}

impl ConvertStep {
    pub fn new(ctx: Arc<MigrationContext>) -> Result<Self, MigrationError> {
        let converter = &ctx.config.converter;
        let table = PromptTable::from_config(&converter.prompts)?;
        let driver = InteractiveDriver::new(converter.program.clone(), table)
            .arg(ctx.target.as_os_str())
            .args(converter.args.iter())
            .with_timeout(converter.timeout_secs);

        Ok(Self { driver })
    }
}

#[async_trait]
impl MigrationStep for ConvertStep {
    fn title(&self) -> String {
        format!(
            "Generating tsconfig and converting files (with {})",
            code(self.driver.program())
        )
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        let report = self.driver.run().await?;
        for sent in &report.answers {
            info!("Answered {:?} to \"{}\"", sent.answer, sent.prompt);
        }
        Ok(StepOutcome::Applied)
    }
}
