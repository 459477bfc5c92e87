//! hsmgen - attended key-generation ceremony for PKCS#11 HSMs
//!
//! Drives the external `pkcs11-tool` to generate keypairs inside a hardware
//! module, one deterministic slot per configured key role, then extracts the
//! public halves and converts them to PEM with `openssl`. Strictly
//! sequential and fail-fast: a ceremony either completes every role or
//! halts where it failed for the operator to intervene.

pub mod adapters;
pub mod error;
pub mod logic;
pub mod model;
pub mod ports;
pub mod use_cases;

pub use error::{CeremonyError, CeremonyResult, ResolveError, SecretError, ToolError};
pub use use_cases::{prepare_session, run_ceremony, Session, SessionParams};
