//! Injectable subprocess execution

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

use crate::error::{Error, Result};

/// One external command invocation: program, arguments, optional working
/// directory. Built by the pipeline, executed by a [`ProcessRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Exec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The full command line, for logging.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Runs a command and reports whether it exited successfully. The pipeline
/// only depends on this trait, so tests can substitute deterministic fakes
/// instead of invoking real git/generator binaries.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, exec: &Exec) -> impl Future<Output = Result<()>> + Send;
}

/// Production runner: spawns the process via tokio, captures output, and
/// bounds it with a deadline.
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ProcessRunner for SystemRunner {
    async fn run(&self, exec: &Exec) -> Result<()> {
        info!(
            "Running (cwd = {:?}): {}",
            exec.cwd.as_deref().unwrap_or(Path::new(".")),
            exec.display()
        );

        let mut cmd = tokio::process::Command::new(&exec.program);
        cmd.args(&exec.args);
        if let Some(dir) = &exec.cwd {
            cmd.current_dir(dir);
        }

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| Error::Subprocess {
                program: exec.program.clone(),
                message: format!("timed out after {:?}", self.timeout),
            })?
            .map_err(|e| {
                error!("{} failed to start: {}", exec.program, e);
                Error::Subprocess {
                    program: exec.program.clone(),
                    message: format!("failed to start: {}", e),
                }
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let msg = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("{} failed: {}", exec.display(), msg);
            Err(Error::Subprocess {
                program: exec.program.clone(),
                message: msg,
            })
        }
    }
}
