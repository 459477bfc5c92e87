mod algorithm;
mod pin;
mod platform;
mod role;
mod serial;
mod slot;

pub use algorithm::Algorithm;
pub use pin::{Pin, PinError};
pub use platform::Platform;
pub use role::{KeyRole, KEY_ROLES};
pub use serial::{Serial, SerialError};
pub use slot::{SlotId, BASE_SLOT_ID};
