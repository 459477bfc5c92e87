//! Key roles provisioned by a ceremony
//!
//! The role table is an ordered slice: a role's position determines its slot
//! id, so reordering or inserting entries reassigns slots across runs.

use crate::model::Serial;

/// A named purpose for a generated key within the consuming trust system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRole {
    name: &'static str,
}

/// Roles provisioned by every ceremony, in slot-assignment order
pub const KEY_ROLES: &[KeyRole] = &[KeyRole { name: "root" }, KeyRole { name: "targets" }];

impl KeyRole {
    /// Role name, used as the on-device object label
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// File name for the raw (device-native, binary) public key
    pub fn raw_file_name(&self, serial: &Serial) -> String {
        format!("{}_{}_pubkey.pub", serial, self.name)
    }

    /// File name for the portable (PEM) public key
    pub fn pem_file_name(&self, serial: &Serial) -> String {
        format!("{}_{}_pubkey.pem", serial, self.name)
    }
}
