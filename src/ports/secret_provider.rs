use crate::error::SecretError;
use crate::model::Pin;

/// Capability to collect the operator PIN
///
/// Injected so the ceremony can be driven with a fixed in-memory secret in
/// tests instead of requiring a terminal.
pub trait SecretProvider {
    fn operator_pin(&self) -> Result<Pin, SecretError>;
}
