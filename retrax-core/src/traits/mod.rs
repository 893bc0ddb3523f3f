//! Hardware abstraction traits
//!
//! These traits define the interface between the supervisory logic
//! and the subordinate subsystems. Implementations live in
//! `retrax-drivers` or in the firmware.

pub mod lift;
#[cfg(test)]
pub(crate) mod mock;
pub mod storage;
pub mod switch;

pub use lift::{ActuatorError, Lift};
pub use storage::{Storage, StorageError, Text, MAX_KEY_LEN, MAX_TEXT_LEN};
pub use switch::{Azimuth, Dmc};
