//! CLI output formatting

use crate::core::{ExecutionStatus, StepOutcome};
use crate::execution::{ExecutionEvent, ProgressReporter};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::sync::Mutex;
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ANCHOR: Emoji<'_, '_> = Emoji("⚓️  ", "");

/// Highlight a file name, key or package name inside a step title
pub fn code<D: Display>(value: D) -> String {
    style(value).bold().cyan().to_string()
}

/// Startup banner
pub fn banner(version: &str) -> String {
    format!("{} {}({})", style("sink").bold(), ANCHOR, style(version).dim())
}

/// Create a spinner for a running step
pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Pending => style("PENDING").dim().to_string(),
        ExecutionStatus::Running => style("RUNNING").yellow().to_string(),
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted {
            run_id,
            total_steps,
        } => format!(
            "{} Migrating in {} steps ({})",
            INFO,
            style(total_steps).bold(),
            style(&run_id.to_string()[..8]).dim()
        ),
        ExecutionEvent::StepStarted {
            index,
            total_steps,
            title,
        } => format!(
            "{} {} {}",
            SPINNER,
            style(format!("[{}/{}]", index + 1, total_steps)).dim(),
            title
        ),
        ExecutionEvent::StepSucceeded { title, outcome, .. } => match outcome {
            StepOutcome::Applied => format!("{} {}", CHECK, title),
            StepOutcome::AlreadySatisfied => {
                format!("{} {} {}", CHECK, title, style("(already done)").dim())
            }
        },
        ExecutionEvent::StepFailed { title, error, .. } => {
            format!("{} {}\n   {}", CROSS, title, style(error).red())
        }
        ExecutionEvent::PipelineFinished { run_id, status } => format!(
            "{} Migration ({}) {}",
            INFO,
            style(&run_id.to_string()[..8]).dim(),
            format_status(*status)
        ),
    }
}

/// Renders each step as a spinner that resolves to a check or a cross
#[derive(Debug, Default)]
pub struct SpinnerReporter {
    current: Mutex<Option<ProgressBar>>,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn finish_current(&self, line: String) {
        let spinner = match self.current.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match spinner {
            Some(spinner) => spinner.finish_with_message(line),
            None => println!("{}", line),
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::StepStarted { title, .. } => {
                let spinner = create_spinner(title.clone());
                if let Ok(mut slot) = self.current.lock() {
                    *slot = Some(spinner);
                }
            }
            ExecutionEvent::StepSucceeded { .. } | ExecutionEvent::StepFailed { .. } => {
                self.finish_current(format_execution_event(event));
            }
            ExecutionEvent::PipelineStarted { .. } | ExecutionEvent::PipelineFinished { .. } => {}
        }
    }
}
