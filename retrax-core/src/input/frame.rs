//! Sampled input data
//!
//! The sampler produces one [`InputFrame`] per sample. The controller
//! folds every frame queued since its last tick into a [`Snapshot`], so
//! each edge event is observed by exactly one tick and an emergency
//! assertion seen by any of those samples is not lost.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operator button state for one tick
///
/// `up_pressed`/`down_pressed` are edge events; `both_held` and
/// `emergency_asserted` are levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OperatorInputs {
    pub up_pressed: bool,
    pub down_pressed: bool,
    pub emergency_asserted: bool,
    pub both_held: bool,
}

/// Level-triggered position sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionSensors {
    pub retracted_active: bool,
    pub extended_active: bool,
}

impl PositionSensors {
    /// Exactly the retracted sensor is active
    pub fn at_retracted(&self) -> bool {
        self.retracted_active && !self.extended_active
    }

    /// Exactly the extended sensor is active
    pub fn at_extended(&self) -> bool {
        self.extended_active && !self.retracted_active
    }

    /// Both sensors active at once
    pub fn conflicting(&self) -> bool {
        self.retracted_active && self.extended_active
    }
}

/// One sample as produced by the sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputFrame {
    pub inputs: OperatorInputs,
    pub sensors: PositionSensors,
}

impl InputFrame {
    /// Merge a frame that could not be delivered into this newer one
    ///
    /// Edge events and an emergency assertion survive; the other levels
    /// keep the newer value.
    pub fn carry(&mut self, dropped: &InputFrame) {
        self.inputs.up_pressed |= dropped.inputs.up_pressed;
        self.inputs.down_pressed |= dropped.inputs.down_pressed;
        self.inputs.emergency_asserted |= dropped.inputs.emergency_asserted;
    }
}

/// Read-only input view for one controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub inputs: OperatorInputs,
    pub sensors: PositionSensors,
    /// A tick has consumed this snapshot; the next frame starts a new fold
    consumed: bool,
}

impl Snapshot {
    /// Create a snapshot directly from inputs and sensors
    pub fn new(inputs: OperatorInputs, sensors: PositionSensors) -> Self {
        Self {
            inputs,
            sensors,
            consumed: false,
        }
    }

    /// Fold a newer frame into this snapshot
    ///
    /// Edge events and the emergency level accumulate over all frames
    /// folded between two ticks; the other levels take the newer value.
    pub fn absorb(&mut self, frame: &InputFrame) {
        if self.consumed {
            self.inputs.emergency_asserted = false;
            self.consumed = false;
        }
        self.inputs.up_pressed |= frame.inputs.up_pressed;
        self.inputs.down_pressed |= frame.inputs.down_pressed;
        self.inputs.emergency_asserted |= frame.inputs.emergency_asserted;
        self.inputs.both_held = frame.inputs.both_held;
        self.sensors = frame.sensors;
    }

    /// Mark the snapshot consumed by a tick
    ///
    /// Edge events are dropped. Levels stay valid for a tick that sees no
    /// new frame; the next frame replaces them.
    pub fn clear_edges(&mut self) {
        self.inputs.up_pressed = false;
        self.inputs.down_pressed = false;
        self.consumed = true;
    }

    /// Any button edge in this snapshot
    pub fn any_pressed(&self) -> bool {
        self.inputs.up_pressed || self.inputs.down_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(up: bool, retracted: bool) -> InputFrame {
        InputFrame {
            inputs: OperatorInputs {
                up_pressed: up,
                ..Default::default()
            },
            sensors: PositionSensors {
                retracted_active: retracted,
                extended_active: false,
            },
        }
    }

    #[test]
    fn test_edges_accumulate_levels_overwrite() {
        let mut snap = Snapshot::default();
        snap.absorb(&frame(true, true));
        snap.absorb(&frame(false, false));

        assert!(snap.inputs.up_pressed);
        assert!(!snap.sensors.retracted_active);
    }

    #[test]
    fn test_clear_edges_keeps_levels() {
        let mut snap = Snapshot::default();
        let mut f = frame(true, true);
        f.inputs.emergency_asserted = true;
        snap.absorb(&f);
        snap.clear_edges();

        assert!(!snap.any_pressed());
        assert!(snap.inputs.emergency_asserted);
        assert!(snap.sensors.retracted_active);
    }

    #[test]
    fn test_emergency_held_across_fold() {
        let mut asserted = frame(false, false);
        asserted.inputs.emergency_asserted = true;

        let mut snap = Snapshot::default();
        snap.absorb(&asserted);
        snap.absorb(&frame(false, false));
        assert!(snap.inputs.emergency_asserted);

        // Next fold starts from the new frames only
        snap.clear_edges();
        snap.absorb(&frame(false, false));
        assert!(!snap.inputs.emergency_asserted);
    }

    #[test]
    fn test_carry_keeps_edges_and_emergency() {
        let mut dropped = frame(true, true);
        dropped.inputs.emergency_asserted = true;
        let mut next = frame(false, false);
        next.carry(&dropped);

        assert!(next.inputs.up_pressed);
        assert!(next.inputs.emergency_asserted);
        assert!(!next.sensors.retracted_active);
    }

    #[test]
    fn test_sensor_conflict() {
        let both = PositionSensors {
            retracted_active: true,
            extended_active: true,
        };
        assert!(both.conflicting());
        assert!(!both.at_retracted());
        assert!(!both.at_extended());
        assert!(!PositionSensors::default().conflicting());
    }
}
