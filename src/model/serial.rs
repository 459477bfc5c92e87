use std::fmt;

use thiserror::Error;

/// Device serial number
///
/// Used both as a path component of the output directory and as a filename
/// prefix, so it must not be empty and must not smuggle in path separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Serial(String);

impl Serial {
    pub fn new(serial: &str) -> Result<Self, SerialError> {
        if serial.is_empty() {
            return Err(SerialError::Empty);
        }
        if serial.contains(['/', '\\']) || serial == "." || serial == ".." {
            return Err(SerialError::InvalidPathComponent {
                serial: serial.to_string(),
            });
        }
        Ok(Self(serial.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerialError {
    #[error("serial number must not be empty")]
    Empty,

    #[error("serial number is not usable as a path component: {serial}")]
    InvalidPathComponent { serial: String },
}
