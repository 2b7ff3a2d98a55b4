//! Error types for migration steps

use std::path::PathBuf;
use thiserror::Error;

/// Every way a migration step can fail
///
/// Each variant tells the user what to do next: fix the argument, install
/// or upgrade a tool, investigate a tool failure, or resolve a conflict by hand.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Could not find anything at path: \"{}\"", .0.display())]
    NotFound(PathBuf),

    #[error("Unable to find {tool} on system")]
    MissingDependency { tool: String },

    #[error(
        "Incorrectly formatted version received from {tool}. Expected min version: {required}. Received: {received}"
    )]
    VersionFormat {
        tool: String,
        required: String,
        received: String,
    },

    #[error(
        "Minimum compatible version of {tool} ({required}) not satisfied. Current: {current}\nPlease run: \"{upgrade}\""
    )]
    VersionMismatch {
        tool: String,
        required: String,
        current: String,
        upgrade: String,
    },

    #[error("External tool error: {0}")]
    ExternalTool(String),

    #[error("Unexpected existing {key} entry in {}: {existing}", .path.display())]
    Conflict {
        path: PathBuf,
        key: String,
        existing: String,
    },

    #[error("Unable to find {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Unable to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to write to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse {} as json: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to serialize {} as json: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing \"{key}\" entry in {}", .path.display())]
    MissingKey { path: PathBuf, key: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MigrationError {
    /// Short, stable name of the error class (used in logs)
    pub fn kind(&self) -> &'static str {
        match self {
            MigrationError::InvalidInput(_) => "invalid_input",
            MigrationError::NotFound(_) => "not_found",
            MigrationError::MissingDependency { .. } => "missing_dependency",
            MigrationError::VersionFormat { .. } => "version_format",
            MigrationError::VersionMismatch { .. } => "version_mismatch",
            MigrationError::ExternalTool(_) => "external_tool",
            MigrationError::Conflict { .. } => "conflict",
            MigrationError::MissingFile(_) => "missing_file",
            MigrationError::Read { .. } => "read",
            MigrationError::Write { .. } => "write",
            MigrationError::Parse { .. } => "parse",
            MigrationError::Serialize { .. } => "serialize",
            MigrationError::MissingKey { .. } => "missing_key",
            MigrationError::Config(_) => "config",
        }
    }
}
