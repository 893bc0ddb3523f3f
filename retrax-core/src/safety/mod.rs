//! Safety monitoring
//!
//! Tracks the emergency line and persistent actuator failures and
//! reports the first active fault.

pub mod monitor;

pub use monitor::{FaultKind, SafetyMonitor, SafetyStatus, MAX_FAILED_ROUNDS};
