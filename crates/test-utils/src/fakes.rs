use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use syscmd::batch::BatchArtifact;
use syscmd::errors::{Result, SysCommandError};
use syscmd::exec::{CapturedOutput, ProcessBackend};
use syscmd::identity::IdentityResolver;

/// Identity resolver that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingResolver;

impl IdentityResolver for FailingResolver {
    fn resolve(&self) -> Result<String> {
        Err(SysCommandError::IdentityResolution(
            "forced failure".to_string(),
        ))
    }
}

/// Identity resolver that panics, as a platform host-name call may.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingResolver;

impl IdentityResolver for PanickingResolver {
    fn resolve(&self) -> Result<String> {
        panic!("simulated host name lookup crash");
    }
}

/// Identity resolver with a fixed answer.
#[derive(Debug, Clone)]
pub struct FixedResolver(pub String);

impl IdentityResolver for FixedResolver {
    fn resolve(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Backend whose launch always fails, recording the artifact it was given.
#[derive(Debug, Clone, Default)]
pub struct FailingBackend {
    seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl FailingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifact paths passed to `run`, in call order.
    pub fn seen(&self) -> Vec<PathBuf> {
        self.seen.lock().unwrap().clone()
    }
}

impl ProcessBackend for FailingBackend {
    fn run(&self, artifact: &BatchArtifact) -> Result<CapturedOutput> {
        self.seen.lock().unwrap().push(artifact.path().to_path_buf());
        Err(SysCommandError::Launch {
            program: artifact.path().to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "launch refused"),
        })
    }
}

/// Backend that panics mid-run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingBackend;

impl ProcessBackend for PanickingBackend {
    fn run(&self, _artifact: &BatchArtifact) -> Result<CapturedOutput> {
        panic!("simulated backend crash");
    }
}
