//! Output directory layout for ceremony products

use std::path::{Path, PathBuf};

use crate::error::{CeremonyError, CeremonyResult};
use crate::model::{KeyRole, Serial};

/// The two output paths produced for one key role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePaths {
    /// Raw public key in the device's native binary encoding
    pub raw: PathBuf,
    /// PEM-encoded public key
    pub pem: PathBuf,
}

impl RolePaths {
    pub fn new(out_dir: &Path, serial: &Serial, role: &KeyRole) -> Self {
        Self {
            raw: out_dir.join(role.raw_file_name(serial)),
            pem: out_dir.join(role.pem_file_name(serial)),
        }
    }

    /// Overwrite protection: fail if either output file already exists
    ///
    /// Silently replacing a previously generated public key could mask a
    /// failed generation or hand out the wrong key, so the ceremony halts
    /// instead and leaves the existing file untouched.
    pub fn ensure_absent(&self) -> CeremonyResult<()> {
        for path in [&self.raw, &self.pem] {
            if path.exists() {
                return Err(CeremonyError::OutputAlreadyExists { path: path.clone() });
            }
        }
        Ok(())
    }
}
