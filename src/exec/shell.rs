// src/exec/shell.rs

//! Production backend: runs the artifact under the native interpreter.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::batch::BatchArtifact;
use crate::errors::{Result, SysCommandError};
use crate::exec::backend::{CapturedOutput, ProcessBackend};

pub const DEFAULT_INTERPRETER: &str = "sh";

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs batch artifacts as child processes.
///
/// On Windows the `.cmd` file is started directly, without a console window.
/// Elsewhere it is handed to `interpreter`, since a file without a shebang
/// line cannot be exec'd on its own.
#[derive(Debug, Clone)]
pub struct ShellBackend {
    #[cfg_attr(windows, allow(dead_code))]
    interpreter: PathBuf,
}

impl ShellBackend {
    pub fn new() -> Self {
        Self {
            interpreter: PathBuf::from(DEFAULT_INTERPRETER),
        }
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    #[cfg(windows)]
    fn command_for(&self, artifact: &Path) -> Command {
        use std::os::windows::process::CommandExt;

        let mut cmd = Command::new(artifact);
        cmd.creation_flags(CREATE_NO_WINDOW);
        cmd
    }

    #[cfg(not(windows))]
    fn command_for(&self, artifact: &Path) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(artifact);
        cmd
    }
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessBackend for ShellBackend {
    fn run(&self, artifact: &BatchArtifact) -> Result<CapturedOutput> {
        let mut cmd = self.command_for(artifact.path());
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let program = PathBuf::from(cmd.get_program());
        info!(program = ?program, artifact = ?artifact.path(), "starting batch process");

        let child = cmd.spawn().map_err(|source| SysCommandError::Launch {
            program: program.clone(),
            source,
        })?;

        // Reads stdout and stderr concurrently, then reaps the child.
        let output = child.wait_with_output().map_err(SysCommandError::Capture)?;

        // stderr only goes to diagnostics; the host log shows stdout.
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            debug!(program = ?program, "stderr: {}", line);
        }

        let exit_code = output.status.code();
        info!(
            exit_code = ?exit_code,
            success = output.status.success(),
            "batch process exited"
        );

        Ok(CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            exit_code,
        })
    }
}
