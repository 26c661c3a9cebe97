// src/exec/backend.rs

//! Pluggable process backend abstraction.

use crate::batch::BatchArtifact;
use crate::errors::Result;

/// What a finished batch process left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Everything the process wrote to standard output.
    pub stdout: String,
    /// `None` when the process was ended by a signal.
    pub exit_code: Option<i32>,
}

/// Trait abstracting how a batch artifact is run.
///
/// Implementations block the calling thread until the child has exited.
/// Launch failures must be returned, not swallowed: the engine decides how
/// they are reported.
pub trait ProcessBackend: Send + Sync {
    fn run(&self, artifact: &BatchArtifact) -> Result<CapturedOutput>;
}
