use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// Operator PIN for the hardware module
///
/// Collected once per session and passed to every external invocation that
/// authenticates against the device. The backing storage is wiped on drop
/// and the value never appears in `Debug` output or logs.
#[derive(Clone)]
pub struct Pin(Zeroizing<String>);

impl Pin {
    pub fn new(pin: String) -> Result<Self, PinError> {
        if pin.is_empty() {
            return Err(PinError::Empty);
        }
        Ok(Self(Zeroizing::new(pin)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pin([REDACTED])")
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    #[error("PIN must not be empty")]
    Empty,
}
