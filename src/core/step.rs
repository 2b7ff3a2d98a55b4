//! Step domain model

use crate::core::{error::MigrationError, state::StepOutcome};
use async_trait::async_trait;

/// A single named unit of migration work
///
/// Steps must be idempotent: finding the desired end state already in place
/// is `Ok(StepOutcome::AlreadySatisfied)`, never an error, so that re-running
/// the whole pipeline after a manual fix converges.
#[async_trait]
pub trait MigrationStep: Send + Sync {
    /// Title shown next to the spinner
    fn title(&self) -> String;

    /// Perform the step
    async fn run(&self) -> Result<StepOutcome, MigrationError>;
}

/// Boxed step for the ordered step list
pub type BoxedStep = Box<dyn MigrationStep>;

/// Step built from a title and an async closure
///
/// Handy for one-off steps and tests.
pub struct FnStep<F> {
    title: String,
    run: F,
}

impl<F, Fut> FnStep<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: std::future::Future<Output = Result<StepOutcome, MigrationError>> + Send,
{
    pub fn new(title: impl Into<String>, run: F) -> Self {
        Self {
            title: title.into(),
            run,
        }
    }
}

#[async_trait]
impl<F, Fut> MigrationStep for FnStep<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: std::future::Future<Output = Result<StepOutcome, MigrationError>> + Send,
{
    fn title(&self) -> String {
        self.title.clone()
    }

    async fn run(&self) -> Result<StepOutcome, MigrationError> {
        (self.run)().await
    }
}
