//! Ceremony session setup
//!
//! Prepares everything the orchestrator needs before the first hardware
//! operation: both external tools resolved from the search path, the
//! per-serial output directory in place, the operator PIN collected once.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CeremonyError, CeremonyResult, ToolError};
use crate::model::{Algorithm, Pin, Serial};
use crate::ports::SecretProvider;

/// Key-management tool driving the PKCS#11 device
pub const PKCS11_TOOL: &str = "pkcs11-tool";

/// Format-conversion tool producing the portable public keys
pub const OPENSSL_TOOL: &str = "openssl";

/// Operator-supplied parameters for one ceremony
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub algorithm: Algorithm,
    pub serial: Serial,
    /// Root under which the per-serial output directory is created
    pub products_root: PathBuf,
}

/// Everything the orchestrator needs for one ceremony run
#[derive(Debug)]
pub struct Session {
    pub algorithm: Algorithm,
    pub serial: Serial,
    pub pin: Pin,
    pub out_dir: PathBuf,
    pub pkcs11_tool: PathBuf,
    pub openssl_tool: PathBuf,
}

/// Validate prerequisites and assemble a [`Session`]
///
/// Tool lookup happens first so a missing prerequisite is reported before
/// the operator is prompted for anything.
///
/// # Errors
///
/// Fails with `ToolError::NotFound` when either external tool is absent from
/// the search path, `CeremonyError::CreateDir` when the output directory
/// cannot be created and `SecretError` when PIN collection fails.
pub fn prepare_session<S>(params: SessionParams, secrets: &S) -> CeremonyResult<Session>
where
    S: SecretProvider,
{
    let pkcs11_tool = locate_tool(PKCS11_TOOL)?;
    let openssl_tool = locate_tool(OPENSSL_TOOL)?;

    let out_dir = resolve_out_dir(&params.products_root, &params.serial)?;
    info!(serial = %params.serial, out_dir = %out_dir.display(), "ceremony session ready");

    let pin = secrets.operator_pin()?;

    Ok(Session {
        algorithm: params.algorithm,
        serial: params.serial,
        pin,
        out_dir,
        pkcs11_tool,
        openssl_tool,
    })
}

fn locate_tool(name: &str) -> Result<PathBuf, ToolError> {
    let path = which::which(name).map_err(|_| ToolError::NotFound {
        tool: name.to_string(),
    })?;
    debug!(tool = name, path = %path.display(), "prerequisite tool found");
    Ok(path)
}

/// Create `<root>/<serial>/` if missing; a no-op when it already exists
fn resolve_out_dir(root: &Path, serial: &Serial) -> CeremonyResult<PathBuf> {
    let out_dir = root.join(serial.as_str());
    std::fs::create_dir_all(&out_dir).map_err(|source| CeremonyError::CreateDir {
        path: out_dir.clone(),
        source,
    })?;
    Ok(out_dir)
}
