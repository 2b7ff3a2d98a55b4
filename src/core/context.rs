//! Migration context - the target package and configuration shared by all steps

use crate::core::config::MigrationConfig;
use std::path::{Path, PathBuf};

/// Immutable run-wide inputs
///
/// Resolved once at startup and handed to every step's constructor.
#[derive(Debug, Clone)]
pub struct MigrationContext {
    /// Raw positional arguments, validated by the path check step
    pub args: Vec<String>,

    /// Target package directory (first argument, trimmed)
    pub target: PathBuf,

    /// Effective configuration
    pub config: MigrationConfig,
}

impl MigrationContext {
    /// Build a context from the invocation's positional arguments
    ///
    /// The target is empty when no argument was supplied; the path check
    /// step runs first and rejects that case before anything reads it.
    pub fn from_args(args: Vec<String>, config: MigrationConfig) -> Self {
        let target = args
            .first()
            .map(|arg| PathBuf::from(arg.trim()))
            .unwrap_or_default();

        Self {
            args,
            target,
            config,
        }
    }

    /// Build a context for a known directory
    pub fn for_target<P: AsRef<Path>>(target: P, config: MigrationConfig) -> Self {
        let target = target.as_ref().to_path_buf();
        Self {
            args: vec![target.to_string_lossy().into_owned()],
            target,
            config,
        }
    }

    /// `<target>/package.json`
    pub fn manifest_path(&self) -> PathBuf {
        self.target.join("package.json")
    }

    /// `<target>/.npmignore`
    pub fn npmignore_path(&self) -> PathBuf {
        self.target.join(".npmignore")
    }

    /// The Flow declaration index, reached by ascending from the target
    pub fn flow_index_path(&self) -> PathBuf {
        self.target.join(&self.config.declarations.flow_index)
    }

    /// The TypeScript ignore list, reached by ascending from the target
    pub fn typescript_ignore_list_path(&self) -> PathBuf {
        self.target.join(&self.config.declarations.typescript_ignore_list)
    }
}
