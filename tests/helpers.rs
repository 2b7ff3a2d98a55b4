//! Test utility functions for sink

#![allow(dead_code)]

use sink::{ExecutionEvent, MigrationConfig, MigrationContext, ProgressReporter, StepOutcome};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Reporter that records every event
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ExecutionEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<ExecutionEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Indices of the steps that were started
    pub fn started(&self) -> Vec<usize> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                ExecutionEvent::StepStarted { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    /// Outcomes of the steps that succeeded, in order
    pub fn outcomes(&self) -> Vec<StepOutcome> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                ExecutionEvent::StepSucceeded { outcome, .. } => Some(*outcome),
                _ => None,
            })
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn on_event(&self, event: &ExecutionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// A monorepo with one package at `packages/core/<dir>`
pub struct Monorepo {
    pub root: TempDir,
    pub package: PathBuf,
}

impl Monorepo {
    pub fn new(dir: &str, name: &str) -> Self {
        let root = TempDir::new().unwrap();
        let package = root.path().join("packages").join("core").join(dir);
        std::fs::create_dir_all(&package).unwrap();
        std::fs::create_dir_all(root.path().join("flow-typed")).unwrap();
        std::fs::create_dir_all(root.path().join("typescript")).unwrap();

        std::fs::write(
            package.join("package.json"),
            format!("{{\n  \"name\": \"{}\",\n  \"version\": \"1.0.0\"\n}}", name),
        )
        .unwrap();
        std::fs::write(package.join(".npmignore"), "__tests__\n").unwrap();
        std::fs::write(
            root.path().join("flow-typed").join("core-components.js"),
            "// @flow\n\ndeclare module '@atlaskit/avatar' {\n  declare module.exports: any;\n}\n",
        )
        .unwrap();
        std::fs::write(
            root.path().join("typescript").join("ignored-packages.txt"),
            format!("@atlaskit/avatar\n{}\n", name),
        )
        .unwrap();

        Self { root, package }
    }

    pub fn context(&self) -> Arc<MigrationContext> {
        self.context_with(MigrationConfig::default())
    }

    pub fn context_with(&self, config: MigrationConfig) -> Arc<MigrationContext> {
        Arc::new(MigrationContext::for_target(&self.package, config))
    }

    /// Write an executable script under `<root>/bin` and return its path
    #[cfg(unix)]
    pub fn fake_tool(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.root.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let path = bin.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.root.path().join(relative)).unwrap()
    }

    pub fn read_package(&self, file: &str) -> String {
        std::fs::read_to_string(self.package.join(file)).unwrap()
    }
}
