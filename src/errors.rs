// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SysCommandError {
    /// The batch artifact could not be created or written.
    #[error("could not create batch file in {dir:?}: {source}")]
    Materialization {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS refused to start the child process.
    #[error("could not launch {program:?}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The child started but its output could not be collected.
    #[error("could not collect batch output: {0}")]
    Capture(#[source] std::io::Error),

    #[error("could not resolve machine name: {0}")]
    IdentityResolution(String),

    #[error("persisted state is corrupt: {0}")]
    PersistedStateCorrupt(String),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SysCommandError>;
