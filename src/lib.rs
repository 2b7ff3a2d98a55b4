//! sink - walks a Flow-typed package through its TypeScript migration

pub mod cli;
pub mod core;
pub mod execution;
pub mod files;
pub mod process;
pub mod steps;

// Re-export commonly used types
pub use core::{
    BoxedStep, ExecutionStatus, MigrationConfig, MigrationContext, MigrationError, MigrationStep,
    RunState, StepOutcome,
};
pub use execution::{ExecutionEvent, PipelineRunner, ProgressReporter, RunFailure};
pub use steps::migration_steps;
