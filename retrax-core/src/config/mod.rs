//! Configuration types
//!
//! Timing tunables and move counters persisted as scalar key/value
//! entries in the storage collaborator. Read once at boot and cached.

pub mod counters;
pub mod timing;

pub use counters::{MoveCounter, MoveCounters, KEY_EXTENDED_COUNT, KEY_RETRACTED_COUNT};
pub use timing::{
    TimingConfig, DEFAULT_DELAY_TO_MIDDLE_S, DEFAULT_MOVE_TIMEOUT_S, KEY_DELAY_TO_MIDDLE,
    KEY_MOVE_TIMEOUT,
};
