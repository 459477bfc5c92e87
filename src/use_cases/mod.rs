//! Use cases (orchestration)
//!
//! Session setup and the ceremony state machine, coordinating the module
//! resolver, tool runner and secret provider ports.

mod run_ceremony;
mod session;

pub use run_ceremony::run_ceremony;
pub use session::{prepare_session, Session, SessionParams, OPENSSL_TOOL, PKCS11_TOOL};
