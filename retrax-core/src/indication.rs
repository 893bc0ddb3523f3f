//! Operator indication
//!
//! The controller sets one [`Indication`] per state. A separate output
//! driver renders it on the two button LEDs; the core never touches GPIO.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Blink half-period while the lift is moving (ms)
pub const BLINK_MOVING_MS: u32 = 500;

/// Blink half-period while calibrating (ms)
pub const BLINK_CALIBRATING_MS: u32 = 500;

/// Fast blink half-period for lost position (ms)
pub const BLINK_NO_POSITION_MS: u32 = 250;

/// Fast blink half-period for emergency stop (ms)
pub const BLINK_EMERGENCY_MS: u32 = 250;

/// Enumerated indication value published by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Indication {
    /// Nothing lit
    #[default]
    Off,
    /// Up LED steady
    Retracted,
    /// Down LED steady
    Extended,
    /// Up LED blinking
    Retracting,
    /// Down LED blinking
    Extending,
    /// Both LEDs blinking together
    Calibrating,
    /// Both LEDs fast blinking in alternation
    LostPosition,
    /// Both LEDs fast blinking together
    Emergency,
}

/// Pattern for a single LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedPattern {
    Off,
    On,
    /// Square wave with the given half-period; `inverted` starts low
    Blink { half_period_ms: u32, inverted: bool },
}

impl LedPattern {
    const fn blink(half_period_ms: u32) -> Self {
        LedPattern::Blink {
            half_period_ms,
            inverted: false,
        }
    }

    const fn blink_inverted(half_period_ms: u32) -> Self {
        LedPattern::Blink {
            half_period_ms,
            inverted: true,
        }
    }

    /// LED level at `elapsed_ms` since the pattern started
    pub fn level_at(&self, elapsed_ms: u32) -> bool {
        match *self {
            LedPattern::Off => false,
            LedPattern::On => true,
            LedPattern::Blink {
                half_period_ms,
                inverted,
            } => {
                let half = half_period_ms.max(1);
                let first_half = elapsed_ms % half.saturating_mul(2) < half;
                first_half != inverted
            }
        }
    }
}

impl Indication {
    /// Patterns for the (up, down) LED pair
    pub fn patterns(&self) -> (LedPattern, LedPattern) {
        match self {
            Indication::Off => (LedPattern::Off, LedPattern::Off),
            Indication::Retracted => (LedPattern::On, LedPattern::Off),
            Indication::Extended => (LedPattern::Off, LedPattern::On),
            Indication::Retracting => (LedPattern::blink(BLINK_MOVING_MS), LedPattern::Off),
            Indication::Extending => (LedPattern::Off, LedPattern::blink(BLINK_MOVING_MS)),
            Indication::Calibrating => (
                LedPattern::blink(BLINK_CALIBRATING_MS),
                LedPattern::blink(BLINK_CALIBRATING_MS),
            ),
            Indication::LostPosition => (
                LedPattern::blink(BLINK_NO_POSITION_MS),
                LedPattern::blink_inverted(BLINK_NO_POSITION_MS),
            ),
            Indication::Emergency => (
                LedPattern::blink(BLINK_EMERGENCY_MS),
                LedPattern::blink(BLINK_EMERGENCY_MS),
            ),
        }
    }

    /// Check if this indication reports an error condition
    pub fn is_error(&self) -> bool {
        matches!(self, Indication::LostPosition | Indication::Emergency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_patterns() {
        let (up, down) = Indication::Retracted.patterns();
        assert!(up.level_at(0));
        assert!(up.level_at(12_345));
        assert!(!down.level_at(0));
    }

    #[test]
    fn test_blink_square_wave() {
        let p = LedPattern::blink(250);
        assert!(p.level_at(0));
        assert!(p.level_at(249));
        assert!(!p.level_at(250));
        assert!(!p.level_at(499));
        assert!(p.level_at(500));
    }

    #[test]
    fn test_lost_position_alternates() {
        let (up, down) = Indication::LostPosition.patterns();
        for t in [0, 100, 260, 600, 900] {
            assert_ne!(up.level_at(t), down.level_at(t));
        }
    }

    #[test]
    fn test_emergency_is_fast_blink() {
        let (up, _) = Indication::Emergency.patterns();
        assert_eq!(
            up,
            LedPattern::Blink {
                half_period_ms: BLINK_EMERGENCY_MS,
                inverted: false
            }
        );
        assert!(BLINK_EMERGENCY_MS < BLINK_MOVING_MS);
    }

    #[test]
    fn test_zero_period_does_not_panic() {
        let p = LedPattern::blink(0);
        let _ = p.level_at(7);
    }
}
