// src/engine/reporter.rs

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{info, trace};

use crate::batch::BatchMaterializer;
use crate::config::ConfigFile;
use crate::engine::{ExecutionResult, Phase, RunStatus};
use crate::errors::Result;
use crate::exec::{CapturedOutput, ProcessBackend, ShellBackend};
use crate::identity::{HostnameResolver, IdentityResolver, resolve_or_placeholder};
use crate::script::CommandScript;
use crate::sink::LogSink;

/// Runs a script once and reports it through a [`LogSink`].
///
/// This is the fault boundary for a run: materialization errors, launch
/// errors and backend panics all end up as an `Error` status plus a log
/// line, never as an error or panic for the caller.
pub struct ExecutionReporter {
    materializer: BatchMaterializer,
    backend: Box<dyn ProcessBackend>,
    identity: Box<dyn IdentityResolver>,
}

impl std::fmt::Debug for ExecutionReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionReporter")
            .field("materializer", &self.materializer)
            .finish_non_exhaustive()
    }
}

impl ExecutionReporter {
    pub fn new() -> Self {
        Self {
            materializer: BatchMaterializer::new(),
            backend: Box::new(ShellBackend::new()),
            identity: Box::new(HostnameResolver),
        }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        let mut materializer = BatchMaterializer::new().with_prefix(&cfg.batch().prefix);
        if let Some(dir) = &cfg.batch().dir {
            materializer = materializer.with_dir(dir);
        }
        let backend = ShellBackend::new().with_interpreter(&cfg.runner().interpreter);

        Self::new()
            .with_materializer(materializer)
            .with_backend(backend)
    }

    pub fn with_materializer(mut self, materializer: BatchMaterializer) -> Self {
        self.materializer = materializer;
        self
    }

    pub fn with_backend(mut self, backend: impl ProcessBackend + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    pub fn with_identity(mut self, identity: impl IdentityResolver + 'static) -> Self {
        self.identity = Box::new(identity);
        self
    }

    /// Run `script` and write the report to `sink`.
    pub fn run(&self, script: &CommandScript, sink: &mut dyn LogSink) -> ExecutionResult {
        trace!(phase = ?Phase::Resolving, "run started");
        let machine = resolve_or_placeholder(self.identity.as_ref());
        sink.note(&format!("NOTE: Running system commands on {machine}.\nOutput:"));

        trace!(phase = ?Phase::Executing);
        let start = Instant::now();
        let outcome = self.execute_contained(script);

        trace!(phase = ?Phase::Reporting);
        let (status, stdout, error, exit_code) = match outcome {
            Ok(CapturedOutput { stdout, exit_code }) => {
                sink.normal(&stdout);
                (RunStatus::Success, stdout, None, exit_code)
            }
            Err(message) => {
                sink.error(&format!("ERROR: Could not run commands\n{message}"));
                (RunStatus::Error, String::new(), Some(message), None)
            }
        };

        let elapsed = start.elapsed();
        sink.note(&format!(
            "NOTE: System commands completed.\n\tReal time: {:.2} seconds",
            elapsed.as_secs_f64()
        ));

        info!(
            status = ?status,
            exit_code = ?exit_code,
            elapsed_secs = elapsed.as_secs_f64(),
            "run finished"
        );
        trace!(phase = ?Phase::Idle);

        ExecutionResult {
            status,
            stdout,
            error,
            exit_code,
            machine,
            elapsed,
        }
    }

    /// Execute step with every failure turned into its message text.
    fn execute_contained(&self, script: &CommandScript) -> std::result::Result<CapturedOutput, String> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.execute(script))) {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(err)) => Err(err.to_string()),
            Err(payload) => Err(panic_message(payload.as_ref())),
        }
    }

    /// materialize -> run -> dispose, strictly in that order.
    fn execute(&self, script: &CommandScript) -> Result<CapturedOutput> {
        let artifact = self.materializer.materialize(script)?;
        let outcome = self.backend.run(&artifact);
        // A failed delete is logged by `dispose`; it does not change the outcome.
        let _ = artifact.dispose();
        outcome
    }
}

impl Default for ExecutionReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "batch execution panicked".to_string()
    }
}
