// src/engine/mod.rs

//! Execution engine.
//!
//! One call to [`ExecutionReporter::run`] is one pass through
//! `Idle -> Resolving -> Executing -> Reporting -> Idle`:
//! - resolve the machine identity (never fatal),
//! - materialize the script, run it, dispose of the artifact,
//! - write the outcome and timing to the host log sink.
//!
//! Nothing is kept between passes, so a reporter may be shared by threads
//! running batches concurrently.

use std::time::Duration;

/// Final state reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Error,
}

impl RunStatus {
    pub fn is_success(self) -> bool {
        self == RunStatus::Success
    }
}

/// Phase of a single run, as traced in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Resolving,
    Executing,
    Reporting,
}

/// Everything one run produced. Built during the run and handed back once.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub status: RunStatus,
    /// Captured standard output; empty when the run failed.
    pub stdout: String,
    /// Failure message when `status` is `Error`.
    pub error: Option<String>,
    /// Exit code of the batch process, if it ran and exited normally.
    pub exit_code: Option<i32>,
    /// Machine name written to the log.
    pub machine: String,
    pub elapsed: Duration,
}

pub mod reporter;

pub use reporter::ExecutionReporter;
