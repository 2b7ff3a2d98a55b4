//! Interactive subprocess driver - runs a tool and answers its prompts

use crate::core::MigrationError;
use crate::process::prompts::{PromptScanner, PromptTable, ScanState, SentAnswer};
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, ChildStdout, Command};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Output read size; prompts are short so one chunk usually holds a whole prompt
const CHUNK_SIZE: usize = 4096;

/// What happened during a driven run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverReport {
    /// Exit code (`None` if killed by a signal)
    pub exit_code: Option<i32>,

    /// Answers written to stdin, in order
    pub answers: Vec<SentAnswer>,
}

/// Runs an external tool with piped stdio and answers its prompts
#[derive(Debug, Clone)]
pub struct InteractiveDriver {
    program: String,
    args: Vec<OsString>,
    table: PromptTable,
    timeout_secs: Option<u64>,
}

impl InteractiveDriver {
    /// Create a driver for the given executable
    pub fn new(program: impl Into<String>, table: PromptTable) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            table,
            timeout_secs: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Kill the process if it has not exited after `timeout_secs`
    pub fn with_timeout(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the tool to completion
    ///
    /// Succeeds whenever the process exits, whatever its exit code. Fails with
    /// `ExternalTool` if it cannot be started, if reading its output or
    /// writing an answer fails, or if the optional timeout expires.
    pub async fn run(&self) -> Result<DriverReport, MigrationError> {
        debug!("Spawning {} with args {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                MigrationError::ExternalTool(format!("Failed to start {}: {}", self.program, e))
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            MigrationError::ExternalTool(format!("No stdin pipe for {}", self.program))
        })?;
        let mut stdout = child.stdout.take().ok_or_else(|| {
            MigrationError::ExternalTool(format!("No stdout pipe for {}", self.program))
        })?;

        let mut scanner = PromptScanner::new(self.table.clone());

        let conversation = async {
            Self::converse(&mut stdout, &mut stdin, &mut scanner).await?;
            // Close stdin so a tool still waiting for input sees EOF
            drop(stdin);
            child.wait().await.map_err(|e| {
                MigrationError::ExternalTool(format!("Failed to wait for {}: {}", self.program, e))
            })
        };

        let status = match self.timeout_secs {
            Some(secs) => timeout(Duration::from_secs(secs), conversation)
                .await
                .map_err(|_| {
                    MigrationError::ExternalTool(format!(
                        "{} did not finish within {} seconds",
                        self.program, secs
                    ))
                })?,
            None => conversation.await,
        };

        let status = match status {
            Ok(status) => status,
            Err(e) => {
                scanner.on_error(e.to_string());
                if let ScanState::Failed { reason } = scanner.state() {
                    warn!("{} failed: {}", self.program, reason);
                }
                return Err(e);
            }
        };

        scanner.on_exit(status.code());
        if !status.success() {
            warn!("{} exited with {}", self.program, status);
        }
        info!(
            "{} exited ({:?}) after {} answered prompt(s)",
            self.program,
            status.code(),
            scanner.answers().len()
        );

        Ok(DriverReport {
            exit_code: status.code(),
            answers: scanner.into_answers(),
        })
    }

    /// Scan output chunks as they arrive and answer prompts immediately
    async fn converse(
        stdout: &mut ChildStdout,
        stdin: &mut ChildStdin,
        scanner: &mut PromptScanner,
    ) -> Result<(), MigrationError> {
        let mut buf = [0u8; CHUNK_SIZE];

        loop {
            let read = stdout.read(&mut buf).await.map_err(|e| {
                MigrationError::ExternalTool(format!("Failed to read tool output: {}", e))
            })?;
            if read == 0 {
                return Ok(());
            }

            let chunk = String::from_utf8_lossy(&buf[..read]);
            debug!("tool output: {:?}", chunk);

            if let Some(answer) = scanner.on_chunk(&chunk) {
                debug!("Answering {:?}", answer);
                stdin
                    .write_all(answer.line().as_bytes())
                    .await
                    .map_err(|e| MigrationError::ExternalTool(format!("Failed to answer prompt: {}", e)))?;
                stdin
                    .flush()
                    .await
                    .map_err(|e| MigrationError::ExternalTool(format!("Failed to answer prompt: {}", e)))?;
            }
        }
    }
}
