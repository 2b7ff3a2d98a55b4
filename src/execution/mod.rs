//! Pipeline execution engine

pub mod engine;

pub use engine::{ExecutionEvent, NoopReporter, PipelineRunner, ProgressReporter, RunFailure};
