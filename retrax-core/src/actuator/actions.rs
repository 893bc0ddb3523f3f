//! State entry and exit actions
//!
//! Pure mapping from a transition to the commands it issues. Timers,
//! flags and the counter mirror are handled by the controller.

use super::command::{push_unique, Command, CommandBatch};
use crate::config::MoveCounter;
use crate::input::PositionSensors;
use crate::state::State;

/// Everything off, lift unpowered
const ALL_OFF: &[Command] = &[
    Command::DmcDisable,
    Command::AzimuthDisable,
    Command::LiftUpOff,
    Command::LiftDownOff,
    Command::LiftDisable,
];

/// Propulsion and steering blocked
const DRIVE_OFF: &[Command] = &[Command::DmcDisable, Command::AzimuthDisable];

/// Both motion outputs off
const MOTION_OFF: &[Command] = &[Command::LiftUpOff, Command::LiftDownOff];

fn extend(batch: &mut CommandBatch, cmds: &[Command]) {
    for cmd in cmds {
        push_unique(batch, *cmd);
    }
}

/// Commands issued when leaving `from`
///
/// Leaving EXTENDED blocks propulsion and steering before anything else.
pub fn exit_commands(from: State, batch: &mut CommandBatch) {
    if from == State::Extended {
        extend(batch, DRIVE_OFF);
    }
}

/// Counter incremented on entry to `state`
///
/// The persisted key names are swapped relative to the states: entering
/// RETRACTED bumps the `extended` key and entering EXTENDED bumps the
/// `retracted` key. Existing installations depend on this layout.
pub fn entry_counter(state: State) -> Option<MoveCounter> {
    match state {
        State::Retracted => Some(MoveCounter::Extended),
        State::Extended => Some(MoveCounter::Retracted),
        _ => None,
    }
}

/// Commands issued on entry to `state`
///
/// `sensors` is the snapshot the transition was decided on.
pub fn entry_commands(state: State, sensors: &PositionSensors, batch: &mut CommandBatch) {
    match state {
        State::Init | State::EmergencyStop => extend(batch, ALL_OFF),
        State::Retracted => {
            extend(batch, MOTION_OFF);
            extend(batch, &[Command::LiftDisable, Command::DmcDisable]);
        }
        State::Retracting => {
            extend(batch, DRIVE_OFF);
            extend(
                batch,
                &[Command::LiftEnable, Command::LiftDownOff, Command::LiftUpOn],
            );
        }
        State::Extending => {
            extend(batch, DRIVE_OFF);
            extend(
                batch,
                &[Command::LiftEnable, Command::LiftUpOff, Command::LiftDownOn],
            );
        }
        State::PreRetracting => {
            extend(batch, DRIVE_OFF);
            extend(batch, MOTION_OFF);
        }
        State::Extended => {
            extend(batch, MOTION_OFF);
        }
        State::NoPosition => {
            extend(batch, MOTION_OFF);
            if !sensors.at_extended() {
                extend(batch, DRIVE_OFF);
            }
        }
        State::PreCalibrating => {}
        State::Calibrating => {
            extend(batch, MOTION_OFF);
            extend(batch, DRIVE_OFF);
        }
    }

    if let Some(counter) = entry_counter(state) {
        push_unique(batch, Command::BumpCounter(counter));
    }

    if state == State::Extended {
        extend(batch, &[Command::DmcEnable, Command::AzimuthEnable]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(state: State, sensors: PositionSensors) -> CommandBatch {
        let mut batch = CommandBatch::new();
        entry_commands(state, &sensors, &mut batch);
        batch
    }

    #[test]
    fn test_emergency_blocks_drive_first() {
        let batch = entry(State::EmergencyStop, PositionSensors::default());
        assert_eq!(batch[0], Command::DmcDisable);
        assert_eq!(batch[1], Command::AzimuthDisable);
        assert!(batch.contains(&Command::LiftDisable));
        assert!(!batch.iter().any(|c| c.releases_drive()));
    }

    #[test]
    fn test_only_extended_releases_drive() {
        let sensors = PositionSensors {
            retracted_active: false,
            extended_active: true,
        };
        for state in State::ALL {
            let batch = entry(state, sensors);
            let releases = batch.iter().any(|c| c.releases_drive());
            assert_eq!(releases, state.drive_allowed(), "{:?}", state);
        }
    }

    #[test]
    fn test_motion_turns_opposite_output_off_first() {
        let batch = entry(State::Retracting, PositionSensors::default());
        let down_off = batch.iter().position(|c| *c == Command::LiftDownOff);
        let up_on = batch.iter().position(|c| *c == Command::LiftUpOn);
        assert!(down_off < up_on);

        let batch = entry(State::Extending, PositionSensors::default());
        let up_off = batch.iter().position(|c| *c == Command::LiftUpOff);
        let down_on = batch.iter().position(|c| *c == Command::LiftDownOn);
        assert!(up_off < down_on);
    }

    #[test]
    fn test_counter_swap() {
        let batch = entry(State::Retracted, PositionSensors::default());
        assert!(batch.contains(&Command::BumpCounter(MoveCounter::Extended)));
        assert!(!batch.contains(&Command::BumpCounter(MoveCounter::Retracted)));

        let batch = entry(State::Extended, PositionSensors::default());
        assert!(batch.contains(&Command::BumpCounter(MoveCounter::Retracted)));
    }

    #[test]
    fn test_no_position_keeps_drive_while_extended() {
        let extended = PositionSensors {
            retracted_active: false,
            extended_active: true,
        };
        let batch = entry(State::NoPosition, extended);
        assert!(!batch.contains(&Command::DmcDisable));

        let batch = entry(State::NoPosition, PositionSensors::default());
        assert!(batch.contains(&Command::DmcDisable));
        assert!(batch.contains(&Command::AzimuthDisable));

        let conflicting = PositionSensors {
            retracted_active: true,
            extended_active: true,
        };
        let batch = entry(State::NoPosition, conflicting);
        assert!(batch.contains(&Command::DmcDisable));
    }

    #[test]
    fn test_exit_extended() {
        let mut batch = CommandBatch::new();
        exit_commands(State::Extended, &mut batch);
        assert_eq!(batch.as_slice(), DRIVE_OFF);

        let mut batch = CommandBatch::new();
        exit_commands(State::Retracted, &mut batch);
        assert!(batch.is_empty());
    }
}
