//! Platform to PKCS#11 driver module mapping
//!
//! The table is fixed at build time; installing the OpenSC package on a
//! supported platform puts the module at the mapped path.

use crate::error::ResolveError;
use crate::model::Platform;

const MODULE_TABLE: &[(&str, &str, &str)] = &[
    ("linux", "x86_64", "/usr/lib/x86_64-linux-gnu/opensc-pkcs11.so"),
    ("linux", "aarch64", "/usr/lib/aarch64-linux-gnu/opensc-pkcs11.so"),
    ("macos", "x86_64", "/Library/OpenSC/lib/opensc-pkcs11.so"),
    ("macos", "aarch64", "/Library/OpenSC/lib/opensc-pkcs11.so"),
];

/// Look up the configured module path for a platform
///
/// # Errors
///
/// Returns `ResolveError::UnsupportedPlatform` if the pair has no mapping.
/// Whether the file actually exists is the caller's concern.
pub fn module_path(platform: &Platform) -> Result<&'static str, ResolveError> {
    MODULE_TABLE
        .iter()
        .find(|(family, arch, _)| *family == platform.family && *arch == platform.arch)
        .map(|(_, _, path)| *path)
        .ok_or_else(|| ResolveError::UnsupportedPlatform {
            family: platform.family.clone(),
            arch: platform.arch.clone(),
        })
}
