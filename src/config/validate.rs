// src/config/validate.rs

use std::path::{MAIN_SEPARATOR, Path};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SysCommandError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SysCommandError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.batch, raw.runner))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_batch_dir(cfg.batch.dir.as_deref())?;
    validate_prefix(&cfg.batch.prefix)?;
    validate_interpreter(&cfg.runner.interpreter)?;
    Ok(())
}

fn validate_batch_dir(dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = dir {
        if dir.as_os_str().is_empty() {
            return Err(SysCommandError::ConfigError(
                "[batch].dir must not be empty; omit it to use the temp directory".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(SysCommandError::ConfigError(
            "[batch].prefix must not be empty".to_string(),
        ));
    }
    if prefix.contains(['/', '\\', MAIN_SEPARATOR]) {
        return Err(SysCommandError::ConfigError(format!(
            "[batch].prefix must be a plain file name prefix (got '{prefix}')"
        )));
    }
    Ok(())
}

fn validate_interpreter(interpreter: &str) -> Result<()> {
    if interpreter.trim().is_empty() {
        return Err(SysCommandError::ConfigError(
            "[runner].interpreter must not be empty".to_string(),
        ));
    }
    Ok(())
}
