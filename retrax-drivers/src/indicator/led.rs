//! Button LED pair
//!
//! Renders an [`Indication`] on the LEDs built into the up and down
//! buttons. Blink phase restarts whenever the indication changes.

use embedded_hal::digital::OutputPin;
use retrax_core::indication::Indication;

/// Up/down button LEDs
pub struct LedPair<U, D> {
    up: U,
    down: D,
    indication: Indication,
    /// Timestamp the current indication was applied
    since_ms: u32,
}

impl<U: OutputPin, D: OutputPin> LedPair<U, D> {
    /// Create a new LED pair, both off
    pub fn new(up: U, down: D) -> Self {
        let mut leds = Self {
            up,
            down,
            indication: Indication::Off,
            since_ms: 0,
        };
        leds.drive(false, false);
        leds
    }

    /// Currently rendered indication
    pub fn indication(&self) -> Indication {
        self.indication
    }

    /// Switch to a new indication
    pub fn set(&mut self, indication: Indication, now_ms: u32) {
        if indication != self.indication {
            self.indication = indication;
            self.since_ms = now_ms;
        }
    }

    /// Update the LED levels for `now_ms`
    ///
    /// Returns the (up, down) levels driven.
    pub fn refresh(&mut self, now_ms: u32) -> (bool, bool) {
        let elapsed = now_ms.wrapping_sub(self.since_ms);
        let (up, down) = self.indication.patterns();
        let levels = (up.level_at(elapsed), down.level_at(elapsed));
        self.drive(levels.0, levels.1);
        levels
    }

    fn drive(&mut self, up: bool, down: bool) {
        // LED write errors are not actionable
        let _ = self.up.set_state(up.into());
        let _ = self.down.set_state(down.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use retrax_core::indication::{BLINK_EMERGENCY_MS, BLINK_MOVING_MS};

    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }
    }

    fn leds() -> LedPair<MockPin, MockPin> {
        LedPair::new(MockPin::default(), MockPin::default())
    }

    #[test]
    fn test_steady_extended() {
        let mut leds = leds();
        leds.set(Indication::Extended, 0);
        assert_eq!(leds.refresh(10), (false, true));
        assert!(leds.down.high);
        assert!(!leds.up.high);
    }

    #[test]
    fn test_retracting_blinks_up_only() {
        let mut leds = leds();
        leds.set(Indication::Retracting, 1_000);
        assert_eq!(leds.refresh(1_000), (true, false));
        assert_eq!(leds.refresh(1_000 + BLINK_MOVING_MS), (false, false));
        assert_eq!(leds.refresh(1_000 + 2 * BLINK_MOVING_MS), (true, false));
    }

    #[test]
    fn test_emergency_blinks_together() {
        let mut leds = leds();
        leds.set(Indication::Emergency, 0);
        assert_eq!(leds.refresh(0), (true, true));
        assert_eq!(leds.refresh(BLINK_EMERGENCY_MS), (false, false));
    }

    #[test]
    fn test_same_indication_keeps_phase() {
        let mut leds = leds();
        leds.set(Indication::Calibrating, 0);
        leds.set(Indication::Calibrating, 300);
        assert_eq!(leds.refresh(600), (false, false));
    }
}
