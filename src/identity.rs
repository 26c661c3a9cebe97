// src/identity.rs

//! Which machine the commands run on.
//!
//! The host may be connected to remote servers; the log has to make clear
//! that batch commands execute locally.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::errors::{Result, SysCommandError};

/// Shown when the host name cannot be determined.
pub const PLACEHOLDER_IDENTITY: &str = "local machine";

pub trait IdentityResolver: Send + Sync {
    fn resolve(&self) -> Result<String>;
}

/// Resolves the OS host name.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostnameResolver;

impl IdentityResolver for HostnameResolver {
    fn resolve(&self) -> Result<String> {
        let name = gethostname::gethostname().into_string().map_err(|raw| {
            SysCommandError::IdentityResolution(format!("host name is not valid UTF-8: {raw:?}"))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(SysCommandError::IdentityResolution(
                "host name is empty".to_string(),
            ));
        }
        Ok(name.to_string())
    }
}

/// Resolve the machine name, falling back to [`PLACEHOLDER_IDENTITY`].
///
/// Called once per run; the result is never cached. A resolver that panics
/// is treated like one that failed.
pub fn resolve_or_placeholder(resolver: &dyn IdentityResolver) -> String {
    match panic::catch_unwind(AssertUnwindSafe(|| resolver.resolve())) {
        Ok(Ok(name)) => name,
        Ok(Err(err)) => {
            debug!(error = %err, "using placeholder machine identity");
            PLACEHOLDER_IDENTITY.to_string()
        }
        Err(_) => {
            warn!("machine name lookup panicked; using placeholder machine identity");
            PLACEHOLDER_IDENTITY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl IdentityResolver for Broken {
        fn resolve(&self) -> Result<String> {
            Err(SysCommandError::IdentityResolution("no name".into()))
        }
    }

    struct Explodes;

    impl IdentityResolver for Explodes {
        fn resolve(&self) -> Result<String> {
            panic!("hostname buffer too small");
        }
    }

    #[test]
    fn panic_falls_back_to_placeholder() {
        assert_eq!(resolve_or_placeholder(&Explodes), PLACEHOLDER_IDENTITY);
    }

    #[test]
    fn failure_falls_back_to_placeholder() {
        assert_eq!(resolve_or_placeholder(&Broken), PLACEHOLDER_IDENTITY);
    }

    #[test]
    fn hostname_resolver_never_yields_blank() {
        let name = resolve_or_placeholder(&HostnameResolver);
        assert!(!name.trim().is_empty());
    }
}
