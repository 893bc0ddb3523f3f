//! Timing configuration

use crate::timer::SEC_TO_MS;
use crate::traits::Storage;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Storage key for the lift move timeout (seconds)
pub const KEY_MOVE_TIMEOUT: &str = "lift_move_timeout";

/// Storage key for the delay before retracting (seconds)
pub const KEY_DELAY_TO_MIDDLE: &str = "delay_to_middle";

/// Default lift move timeout (seconds)
pub const DEFAULT_MOVE_TIMEOUT_S: u16 = 20;

/// Default delay before retracting (seconds)
pub const DEFAULT_DELAY_TO_MIDDLE_S: u16 = 5;

/// Accepted move timeout range (seconds)
pub const MOVE_TIMEOUT_RANGE_S: core::ops::RangeInclusive<i32> = 1..=120;

/// Accepted delay-to-middle range (seconds)
pub const DELAY_TO_MIDDLE_RANGE_S: core::ops::RangeInclusive<i32> = 0..=60;

/// Durations used by the timed states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Maximum time for a retract or extend motion
    pub move_timeout_s: u16,
    /// Dwell in PRERETRACTING before the lift starts moving up
    pub delay_to_middle_s: u16,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            move_timeout_s: DEFAULT_MOVE_TIMEOUT_S,
            delay_to_middle_s: DEFAULT_DELAY_TO_MIDDLE_S,
        }
    }
}

impl TimingConfig {
    /// Move timeout in milliseconds
    pub fn move_timeout_ms(&self) -> u32 {
        self.move_timeout_s as u32 * SEC_TO_MS
    }

    /// Delay-to-middle in milliseconds
    pub fn delay_to_middle_ms(&self) -> u32 {
        self.delay_to_middle_s as u32 * SEC_TO_MS
    }

    /// Load timing from storage
    ///
    /// Missing or out-of-range values are replaced by their default and
    /// written back. A backend failure falls back to the default without
    /// writing.
    pub fn load<S: Storage>(store: &mut S) -> Self {
        Self {
            move_timeout_s: load_seconds(
                store,
                KEY_MOVE_TIMEOUT,
                DEFAULT_MOVE_TIMEOUT_S,
                MOVE_TIMEOUT_RANGE_S,
            ),
            delay_to_middle_s: load_seconds(
                store,
                KEY_DELAY_TO_MIDDLE,
                DEFAULT_DELAY_TO_MIDDLE_S,
                DELAY_TO_MIDDLE_RANGE_S,
            ),
        }
    }
}

fn load_seconds<S: Storage>(
    store: &mut S,
    key: &str,
    default: u16,
    range: core::ops::RangeInclusive<i32>,
) -> u16 {
    match store.get_int_or_init(key, default as i32) {
        Ok(value) if range.contains(&value) => value as u16,
        Ok(_) => {
            // Out of range: a failed write-back still leaves us on the default
            let _ = store.set_int(key, default as i32);
            default
        }
        Err(_) => default,
    }
}
