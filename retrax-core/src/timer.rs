//! Per-state timers
//!
//! A timed state captures `now` on entry; guards compare the elapsed time
//! against a duration. Timestamps are milliseconds since boot and wrap
//! after ~49 days, so all arithmetic is wrapping.

/// Both-button hold from EXTENDED to CALIBRATING (ms)
///
/// Counted from the start of the hold. PRECALIBRATING is entered once
/// the sampler reports `both_held`, so its own timer runs for this
/// window minus the sampler's lead time.
pub const PRECALIBRATE_CONFIRM_MS: u32 = 5_000;

/// Calibration window (ms)
pub const CALIBRATE_WINDOW_MS: u32 = 3_000;

/// Milliseconds per second
pub const SEC_TO_MS: u32 = 1_000;

/// Elapsed-time tracker for the active state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateTimer {
    entry_ms: u32,
}

impl StateTimer {
    /// Start a timer at `now_ms`
    pub fn started_at(now_ms: u32) -> Self {
        Self { entry_ms: now_ms }
    }

    /// Re-capture the entry timestamp
    pub fn restart(&mut self, now_ms: u32) {
        self.entry_ms = now_ms;
    }

    /// Time since state entry
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.entry_ms)
    }

    /// Time left until `duration_ms` has elapsed (0 once expired)
    pub fn remaining_ms(&self, now_ms: u32, duration_ms: u32) -> u32 {
        duration_ms.saturating_sub(self.elapsed_ms(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed() {
        let t = StateTimer::started_at(1_000);
        assert_eq!(t.elapsed_ms(1_500), 500);
        assert_eq!(t.elapsed_ms(6_000), 5_000);
    }

    #[test]
    fn test_remaining() {
        let t = StateTimer::started_at(0);
        assert_eq!(t.remaining_ms(1_000, 3_000), 2_000);
        assert_eq!(t.remaining_ms(4_000, 3_000), 0);
    }

    #[test]
    fn test_wraparound() {
        let t = StateTimer::started_at(u32::MAX - 100);
        assert_eq!(t.elapsed_ms(200), 301);
        assert_eq!(t.remaining_ms(200, 300), 0);
    }

    #[test]
    fn test_restart() {
        let mut t = StateTimer::started_at(0);
        t.restart(10_000);
        assert_eq!(t.elapsed_ms(10_250), 250);
    }
}
