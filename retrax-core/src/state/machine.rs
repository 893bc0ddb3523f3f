//! Controller states
//!
//! Exactly one state is active at any instant. The state is owned by the
//! [`Controller`](crate::controller::Controller) and only changes through
//! its tick.

use crate::indication::Indication;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Supervisory controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum State {
    /// Power-on; all outputs off
    Init,
    /// Lift confirmed up by the retracted sensor
    Retracted,
    /// Lift motor driving up
    Retracting,
    /// Dwell before retracting so the azimuth can re-centre
    PreRetracting,
    /// Lift confirmed down; drive and steering released
    Extended,
    /// Lift motor driving down
    Extending,
    /// Sensors do not confirm a terminal position (fail-safe)
    NoPosition,
    /// Both buttons held from EXTENDED, waiting for the confirm window
    PreCalibrating,
    /// Calibration window open
    Calibrating,
    /// Emergency line asserted; everything de-energized
    EmergencyStop,
}

impl State {
    /// All states, in declaration order
    pub const ALL: [State; 10] = [
        State::Init,
        State::Retracted,
        State::Retracting,
        State::PreRetracting,
        State::Extended,
        State::Extending,
        State::NoPosition,
        State::PreCalibrating,
        State::Calibrating,
        State::EmergencyStop,
    ];

    /// Upper-case state name as shown on the console
    pub fn name(&self) -> &'static str {
        match self {
            State::Init => "INIT",
            State::Retracted => "RETRACTED",
            State::Retracting => "RETRACTING",
            State::PreRetracting => "PRERETRACTING",
            State::Extended => "EXTENDED",
            State::Extending => "EXTENDING",
            State::NoPosition => "NO_POSITION",
            State::PreCalibrating => "PRECALIBRATING",
            State::Calibrating => "CALIBRATING",
            State::EmergencyStop => "EMERGENCY_STOP",
        }
    }

    /// Check if drive and steering are released in this state
    pub fn drive_allowed(&self) -> bool {
        matches!(self, State::Extended)
    }

    /// Check if this state runs against a timer captured at entry
    pub fn is_timed(&self) -> bool {
        matches!(
            self,
            State::PreRetracting
                | State::Retracting
                | State::Extending
                | State::PreCalibrating
                | State::Calibrating
        )
    }

    /// Check if this is a fault state
    pub fn is_fault(&self) -> bool {
        matches!(self, State::NoPosition | State::EmergencyStop)
    }

    /// Operator indication shown while this state is active
    pub fn indication(&self) -> Indication {
        match self {
            State::Init => Indication::Off,
            State::Retracted => Indication::Retracted,
            State::PreRetracting | State::Retracting => Indication::Retracting,
            State::Extended => Indication::Extended,
            State::Extending => Indication::Extending,
            State::PreCalibrating | State::Calibrating => Indication::Calibrating,
            State::NoPosition => Indication::LostPosition,
            State::EmergencyStop => Indication::Emergency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        for (i, a) in State::ALL.iter().enumerate() {
            for b in State::ALL.iter().skip(i + 1) {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_only_extended_releases_drive() {
        for state in State::ALL {
            assert_eq!(state.drive_allowed(), state == State::Extended);
        }
    }

    #[test]
    fn test_fault_indications() {
        assert_eq!(State::NoPosition.indication(), Indication::LostPosition);
        assert_eq!(State::EmergencyStop.indication(), Indication::Emergency);
        assert!(State::EmergencyStop.indication().is_error());
        assert!(!State::Extended.indication().is_error());
    }

    #[test]
    fn test_fault_states() {
        let faults: Vec<State> = State::ALL.into_iter().filter(State::is_fault).collect();
        assert_eq!(faults, [State::NoPosition, State::EmergencyStop]);
    }
}
