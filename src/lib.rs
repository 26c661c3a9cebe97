// src/lib.rs

pub mod batch;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod identity;
pub mod logging;
pub mod script;
pub mod sink;
pub mod state;
pub mod task;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, RunArgs};
use crate::config::ConfigFile;
use crate::engine::{ExecutionReporter, RunStatus};
use crate::script::CommandScript;
use crate::sink::ConsoleSink;
use crate::task::SysCommandTask;

/// High-level entry point used by `main.rs`.
///
/// The bundled binary plays the host: it loads config, builds the task,
/// and hands the run to a blocking worker thread, as a host application
/// would from its own thread pool.
pub async fn run(args: CliArgs) -> Result<RunStatus> {
    let cfg = config::load_or_default(args.config.as_deref())?;
    debug!(?cfg, "configuration loaded");

    match args.command {
        Command::Run(run_args) => run_batch(&cfg, run_args).await,
        Command::Save { script, output } => {
            save_state(&script, output.as_deref())?;
            Ok(RunStatus::Success)
        }
        Command::Show { state } => {
            show_state(&state)?;
            Ok(RunStatus::Success)
        }
    }
}

async fn run_batch(cfg: &ConfigFile, args: RunArgs) -> Result<RunStatus> {
    let task = build_task(cfg, args)?;
    info!(bytes = task.script().as_str().len(), "running command batch");

    let status = tokio::task::spawn_blocking(move || task.run(&mut ConsoleSink))
        .await
        .context("batch worker thread failed")?;
    Ok(status)
}

/// Build the task for `run` from whichever script source was given.
pub fn build_task(cfg: &ConfigFile, args: RunArgs) -> Result<SysCommandTask> {
    let mut task = SysCommandTask::new().with_reporter(ExecutionReporter::from_config(cfg));

    if let Some(path) = args.script {
        task.set_script(read_text(&path)?);
    } else if let Some(text) = args.text {
        task.set_script(text);
    } else if let Some(path) = args.state {
        task.restore_state_from_xml(&read_text(&path)?);
    }

    Ok(task)
}

fn save_state(script_path: &Path, output: Option<&Path>) -> Result<()> {
    let script = CommandScript::new(read_text(script_path)?);
    let task = SysCommandTask::new().with_script(script);
    let xml = task.xml_state();

    match output {
        Some(path) => fs::write(path, xml).with_context(|| format!("writing state to {path:?}"))?,
        None => println!("{xml}"),
    }
    Ok(())
}

fn show_state(state_path: &Path) -> Result<()> {
    let mut task = SysCommandTask::new();
    task.restore_state_from_xml(&read_text(state_path)?);
    println!("{}", task.script());
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {path:?}"))
}
