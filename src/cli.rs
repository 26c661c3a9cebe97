// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `syscmd`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "syscmd",
    version,
    about = "Run a stored batch of system commands and report its output.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Syscmd.toml` in the current working directory, if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SYSCMD_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a command batch and print its report.
    Run(RunArgs),

    /// Write the persisted state for a script file.
    Save {
        /// Script file to store.
        #[arg(long, value_name = "FILE")]
        script: PathBuf,

        /// Where to write the state; stdout if omitted.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the script held in a persisted state file.
    Show {
        #[arg(long, value_name = "FILE")]
        state: PathBuf,
    },
}

/// Where the script for `run` comes from. With none given, the placeholder
/// script runs.
#[derive(Debug, Clone, Default, Args)]
#[group(multiple = false)]
pub struct RunArgs {
    /// Read the script from a file.
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Take the script text from the command line.
    #[arg(long = "command", short = 'c', value_name = "TEXT")]
    pub text: Option<String>,

    /// Restore the script from a persisted state file.
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
