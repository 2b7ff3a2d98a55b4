//! Pipeline runner - executes the ordered steps and stops at the first failure

use crate::core::{BoxedStep, ExecutionStatus, MigrationError, RunState, StepOutcome};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Observations emitted while the pipeline runs
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionEvent {
    PipelineStarted {
        run_id: Uuid,
        total_steps: usize,
    },
    StepStarted {
        index: usize,
        total_steps: usize,
        title: String,
    },
    StepSucceeded {
        index: usize,
        title: String,
        outcome: StepOutcome,
    },
    StepFailed {
        index: usize,
        title: String,
        error: String,
    },
    PipelineFinished {
        run_id: Uuid,
        status: ExecutionStatus,
    },
}

/// Receives execution events as they happen
///
/// This trait is object-safe and can be used as `Arc<dyn ProgressReporter>`.
pub trait ProgressReporter: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// Reporter that does nothing
#[derive(Debug, Clone, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_event(&self, _event: &ExecutionEvent) {}
}

/// The step that aborted a run
#[derive(Debug, Error)]
#[error("{title} failed: {error}")]
pub struct RunFailure {
    /// Position of the failing step
    pub index: usize,
    pub title: String,
    #[source]
    pub error: MigrationError,
    /// Final run state
    pub state: RunState,
}

/// Runs steps strictly in sequence
pub struct PipelineRunner {
    steps: Vec<BoxedStep>,
    reporters: Vec<Arc<dyn ProgressReporter>>,
}

impl PipelineRunner {
    pub fn new(steps: Vec<BoxedStep>) -> Self {
        Self {
            steps,
            reporters: Vec::new(),
        }
    }

    /// Add a reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporters.push(reporter);
        self
    }

    fn emit(&self, event: ExecutionEvent) {
        for reporter in &self.reporters {
            reporter.on_event(&event);
        }
    }

    /// Execute every step in order
    ///
    /// Each step is awaited to completion before the next starts. The first
    /// error aborts the run; later steps never execute.
    pub async fn run(&self) -> Result<RunState, RunFailure> {
        let mut state = RunState::new();
        let total_steps = self.steps.len();

        info!("Starting migration run {} ({} steps)", state.run_id, total_steps);
        state.start(total_steps);
        self.emit(ExecutionEvent::PipelineStarted {
            run_id: state.run_id,
            total_steps,
        });

        for (index, step) in self.steps.iter().enumerate() {
            let title = step.title();
            state.advance_to(index);

            self.emit(ExecutionEvent::StepStarted {
                index,
                total_steps,
                title: title.clone(),
            });

            match step.run().await {
                Ok(outcome) => {
                    info!("Step {} succeeded ({:?}): {}", index + 1, outcome, title);
                    self.emit(ExecutionEvent::StepSucceeded {
                        index,
                        title,
                        outcome,
                    });
                }
                Err(e) => {
                    info!("Step {} failed [{}]: {}", index + 1, e.kind(), e);
                    self.emit(ExecutionEvent::StepFailed {
                        index,
                        title: title.clone(),
                        error: e.to_string(),
                    });

                    state.fail();
                    self.emit(ExecutionEvent::PipelineFinished {
                        run_id: state.run_id,
                        status: state.status,
                    });
                    return Err(RunFailure {
                        index,
                        title,
                        error: e,
                        state,
                    });
                }
            }
        }

        state.complete();
        info!("Migration run {} completed", state.run_id);
        self.emit(ExecutionEvent::PipelineFinished {
            run_id: state.run_id,
            status: state.status,
        });

        Ok(state)
    }
}
