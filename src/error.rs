//! Error types for hsmgen
//!
//! Every failure in a ceremony is fatal: errors are never caught and retried
//! internally, only propagated to the binary boundary which prints a single
//! message and exits non-zero.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for ceremony operations
pub type CeremonyResult<T> = Result<T, CeremonyError>;

/// Top-level error type for a ceremony run
#[derive(Error, Debug)]
pub enum CeremonyError {
    /// PKCS#11 driver module resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// External tool errors
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Operator secret collection errors
    #[error(transparent)]
    Secret(#[from] SecretError),

    /// A ceremony output file is already present
    ///
    /// Previously generated public keys are never overwritten; the operator
    /// must move the existing products aside before re-running.
    #[error("output file already exists, refusing to overwrite: {path}")]
    OutputAlreadyExists { path: PathBuf },

    /// Output directory creation failed
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// PKCS#11 driver module resolution errors
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No module path is configured for this host
    #[error("unsupported platform: {family}/{arch}")]
    UnsupportedPlatform { family: String, arch: String },

    /// The configured module path does not exist as a regular file
    #[error("PKCS#11 module not installed at {path}")]
    MissingModule { path: PathBuf },
}

/// External tool errors
#[derive(Error, Debug)]
pub enum ToolError {
    /// Required executable is absent from the search path
    #[error("required tool not found on PATH: {tool}")]
    NotFound { tool: String },

    /// The process could not be launched at all
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: String,
        source: std::io::Error,
    },

    /// The process ran and exited non-zero
    #[error("{tool} exited with status {code}")]
    Failed { tool: String, code: i32 },

    /// The process was killed by a signal before exiting
    #[error("{tool} terminated by signal")]
    Terminated { tool: String },
}

/// Operator secret collection errors
#[derive(Error, Debug)]
pub enum SecretError {
    /// Reading from the terminal failed
    #[error("failed to read operator PIN: {0}")]
    Prompt(#[from] std::io::Error),

    /// The entered PIN failed validation
    #[error(transparent)]
    Invalid(#[from] crate::model::PinError),
}
