// src/logging.rs

//! Diagnostic output for the `syscmd` binary.
//!
//! `--log-level` wins when given. Otherwise `SYSCMD_LOG` is read as an
//! `EnvFilter` directive string (`debug`, `syscmd::exec=trace,warn`, ...).
//! With neither, only warnings and errors are shown.
//!
//! Diagnostics go to STDERR. The run report goes through the log sink.

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "SYSCMD_LOG";

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = build_filter(cli_level, std::env::var(LOG_ENV_VAR).ok().as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("initialising logging")
}

/// Unparseable directives fall back to the `warn` default.
fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    let fallback = || EnvFilter::default().add_directive(LevelFilter::WARN.into());

    match (cli_level, env) {
        (Some(level), _) => EnvFilter::default().add_directive(LevelFilter::from(level).into()),
        (None, Some(directives)) => EnvFilter::try_new(directives.trim()).unwrap_or_else(|_| fallback()),
        (None, None) => fallback(),
    }
}
