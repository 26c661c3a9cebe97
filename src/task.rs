// src/task.rs

//! The task as the host sees it.

use std::io::Read;

use crate::engine::{ExecutionReporter, ExecutionResult, RunStatus};
use crate::errors::{Result, SysCommandError};
use crate::script::CommandScript;
use crate::sink::LogSink;
use crate::state;

/// A stored command batch that the host can persist, edit and run.
///
/// `run` borrows the task immutably, so one task may be run from several
/// threads at once; the script is only read during a run.
#[derive(Debug, Default)]
pub struct SysCommandTask {
    script: CommandScript,
    reporter: ExecutionReporter,
}

impl SysCommandTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(mut self, script: impl Into<CommandScript>) -> Self {
        self.script = script.into();
        self
    }

    pub fn with_reporter(mut self, reporter: ExecutionReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn script(&self) -> &CommandScript {
        &self.script
    }

    pub fn set_script(&mut self, script: impl Into<CommandScript>) {
        self.script = script.into();
    }

    /// State handed to the host at save time.
    pub fn xml_state(&self) -> String {
        state::encode(&self.script)
    }

    /// State handed back at load time. Unreadable state keeps the current
    /// script.
    pub fn restore_state_from_xml(&mut self, xml_state: &str) {
        state::restore(&mut self.script, xml_state);
    }

    /// Run the batch and report only the outcome.
    pub fn run(&self, sink: &mut dyn LogSink) -> RunStatus {
        self.execute(sink).status
    }

    /// Run the batch, keeping the full result.
    pub fn execute(&self, sink: &mut dyn LogSink) -> ExecutionResult {
        self.reporter.run(&self.script, sink)
    }

    /// Runs cannot be interrupted once started.
    pub fn cancel(&self) -> bool {
        false
    }

    /// The log is the only output of this task.
    pub fn result_count(&self) -> usize {
        0
    }

    pub fn open_result_stream(&self, _index: usize) -> Result<Box<dyn Read + Send>> {
        Err(SysCommandError::NotImplemented(
            "system command tasks produce no result streams",
        ))
    }
}
