use std::path::PathBuf;

use crate::error::ResolveError;

/// Capability to resolve the PKCS#11 driver module for this host
///
/// Resolution is invoked before every external call that needs the module
/// rather than once per session, so a module that disappears mid-ceremony
/// fails the next step instead of being masked by a stale path.
pub trait ModuleResolver {
    fn resolve(&self) -> Result<PathBuf, ResolveError>;
}
