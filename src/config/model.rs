// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::batch::DEFAULT_PREFIX;
use crate::exec::shell::DEFAULT_INTERPRETER;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [batch]
/// dir = "/var/tmp/syscmd"
/// prefix = "syscmd-"
///
/// [runner]
/// interpreter = "sh"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub batch: BatchSection,

    #[serde(default)]
    pub runner: RunnerSection,
}

/// `[batch]` section: where and how artifacts are written.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchSection {
    /// Artifact directory. `None` means the OS temp directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Filename prefix for artifacts.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            dir: None,
            prefix: default_prefix(),
        }
    }
}

/// `[runner]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    /// Interpreter the artifact is handed to. Ignored on Windows, where the
    /// `.cmd` file is started directly.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
}

fn default_interpreter() -> String {
    DEFAULT_INTERPRETER.to_string()
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
        }
    }
}

/// Validated configuration. Build it from a [`RawConfigFile`] via
/// `TryFrom`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    batch: BatchSection,
    runner: RunnerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(batch: BatchSection, runner: RunnerSection) -> Self {
        Self { batch, runner }
    }

    pub fn batch(&self) -> &BatchSection {
        &self.batch
    }

    pub fn runner(&self) -> &RunnerSection {
        &self.runner
    }
}
