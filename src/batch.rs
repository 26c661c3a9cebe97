// src/batch.rs

//! Batch artifacts: the command text written out as a runnable file.
//!
//! An artifact owns its file for exactly one run. The file is removed by
//! [`BatchArtifact::dispose`], or when the artifact is dropped on any other
//! path (early return, error, unwinding).

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, TempPath};
use tracing::{debug, warn};

use crate::errors::{Result, SysCommandError};
use crate::script::CommandScript;

/// Extension the native interpreter recognises as a batch file.
#[cfg(windows)]
pub const BATCH_EXTENSION: &str = ".cmd";
#[cfg(not(windows))]
pub const BATCH_EXTENSION: &str = ".sh";

pub const DEFAULT_PREFIX: &str = "syscmd-";

/// Writes scripts into uniquely named files.
///
/// Uniqueness comes from the OS temp-file primitive (`O_EXCL` creation with
/// a random name), so concurrent runs never share a file.
#[derive(Debug, Clone)]
pub struct BatchMaterializer {
    dir: Option<PathBuf>,
    prefix: String,
}

impl BatchMaterializer {
    /// Materializer writing to the OS temp directory.
    pub fn new() -> Self {
        Self {
            dir: None,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Directory artifacts are created in.
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Create a fresh artifact holding exactly the bytes of `script`.
    pub fn materialize(&self, script: &CommandScript) -> Result<BatchArtifact> {
        let dir = self.dir();
        let failed = |source| SysCommandError::Materialization {
            dir: dir.clone(),
            source,
        };

        let mut file = Builder::new()
            .prefix(&self.prefix)
            .suffix(BATCH_EXTENSION)
            .tempfile_in(&dir)
            .map_err(failed)?;

        file.write_all(script.as_str().as_bytes()).map_err(failed)?;
        file.flush().map_err(failed)?;
        make_executable(file.as_file()).map_err(failed)?;

        // Close our handle; Linux refuses to exec a file open for writing.
        let path = file.into_temp_path();
        debug!(path = ?path, bytes = script.as_str().len(), "batch artifact created");

        Ok(BatchArtifact { path })
    }
}

impl Default for BatchMaterializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn make_executable(file: &std::fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o700))
}

#[cfg(not(unix))]
fn make_executable(_file: &std::fs::File) -> std::io::Result<()> {
    Ok(())
}

/// A batch file on disk, deleted when this value goes away.
#[derive(Debug)]
pub struct BatchArtifact {
    path: TempPath,
}

impl BatchArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now, reporting failure to the caller.
    pub fn dispose(self) -> std::io::Result<()> {
        let path = self.path.to_path_buf();
        match self.path.close() {
            Ok(()) => {
                debug!(path = ?path, "batch artifact removed");
                Ok(())
            }
            Err(err) => {
                warn!(path = ?path, error = %err, "failed to remove batch artifact");
                Err(err)
            }
        }
    }
}
