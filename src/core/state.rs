//! Run state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall pipeline run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Run has not started
    Pending,
    /// A step is currently running
    Running,
    /// Every step succeeded
    Completed,
    /// A step failed and the run was aborted
    Failed,
}

/// Result of a step that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The step changed something
    Applied,
    /// The desired end state was already in place
    AlreadySatisfied,
}

/// State of the single pipeline run of this invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Unique run ID (for log correlation)
    pub run_id: Uuid,

    /// Current status
    pub status: ExecutionStatus,

    /// Index of the step being (or last) executed
    pub cursor: usize,

    /// Total number of steps
    pub total_steps: usize,

    /// Index of the failing step, if any
    pub failed_step: Option<usize>,

    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run completed or failed
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunState {
    /// Create a new run state
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            status: ExecutionStatus::Pending,
            cursor: 0,
            total_steps: 0,
            failed_step: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Mark run as started
    pub fn start(&mut self, total_steps: usize) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Utc::now());
        self.total_steps = total_steps;
        self.cursor = 0;
    }

    /// Move the cursor to the given step
    pub fn advance_to(&mut self, index: usize) {
        self.cursor = index;
    }

    /// Mark run as completed
    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.finished_at = Some(Utc::now());
    }

    /// Mark run as failed at the current cursor
    pub fn fail(&mut self) {
        self.status = ExecutionStatus::Failed;
        self.failed_step = Some(self.cursor);
        self.finished_at = Some(Utc::now());
    }

    /// Number of steps that finished successfully
    pub fn succeeded_steps(&self) -> usize {
        match self.status {
            ExecutionStatus::Pending => 0,
            ExecutionStatus::Running => self.cursor,
            ExecutionStatus::Completed => self.total_steps,
            ExecutionStatus::Failed => self.failed_step.unwrap_or(self.cursor),
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
