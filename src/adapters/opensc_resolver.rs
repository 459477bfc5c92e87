//! OpenSC module resolution for the running host

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ResolveError;
use crate::logic::module_path;
use crate::model::Platform;
use crate::ports::ModuleResolver;

/// Resolves the OpenSC PKCS#11 module from the built-in platform table
#[derive(Debug, Clone)]
pub struct OpenScResolver {
    platform: Platform,
}

impl OpenScResolver {
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
        }
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }
}

impl Default for OpenScResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleResolver for OpenScResolver {
    fn resolve(&self) -> Result<PathBuf, ResolveError> {
        let path = module_path(&self.platform)?;
        let path = verify_module_file(Path::new(path))?;
        debug!(module = %path.display(), "resolved PKCS#11 module");
        Ok(path)
    }
}

/// Require the mapped path to exist as a regular file
fn verify_module_file(path: &Path) -> Result<PathBuf, ResolveError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(path.to_path_buf()),
        _ => Err(ResolveError::MissingModule {
            path: path.to_path_buf(),
        }),
    }
}
