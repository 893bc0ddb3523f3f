//! Declarative transition table
//!
//! Each state owns an ordered list of `(guard, target)` rules. Guards are
//! pure functions of the tick's input snapshot, the time spent in the
//! current state and the cached timing configuration. The first true
//! guard wins; later guards are not evaluated.
//!
//! The emergency guard is not part of the per-state lists: the engine
//! evaluates it globally, before any rule, for every state.

use super::machine::State;
use crate::config::TimingConfig;
use crate::input::sampler::BOTH_HOLD_LEAD_MS;
use crate::input::Snapshot;
use crate::timer::{CALIBRATE_WINDOW_MS, PRECALIBRATE_CONFIRM_MS};

/// Duration a timed guard compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Window {
    /// Configured dwell before retracting
    DelayToMiddle,
    /// Configured maximum motion time
    MoveTimeout,
    /// Fixed precalibration confirm window, less the hold time the
    /// sampler needed to report `both_held`
    PrecalibrateConfirm,
    /// Fixed calibration window
    Calibrate,
}

impl Window {
    /// Resolve the window length in milliseconds
    pub fn duration_ms(&self, timing: &TimingConfig) -> u32 {
        match self {
            Window::DelayToMiddle => timing.delay_to_middle_ms(),
            Window::MoveTimeout => timing.move_timeout_ms(),
            Window::PrecalibrateConfirm => PRECALIBRATE_CONFIRM_MS - BOTH_HOLD_LEAD_MS,
            Window::Calibrate => CALIBRATE_WINDOW_MS,
        }
    }

    /// Window that bounds a timed state, if any
    pub fn for_state(state: State) -> Option<Window> {
        match state {
            State::PreRetracting => Some(Window::DelayToMiddle),
            State::Retracting | State::Extending => Some(Window::MoveTimeout),
            State::PreCalibrating => Some(Window::PrecalibrateConfirm),
            State::Calibrating => Some(Window::Calibrate),
            _ => None,
        }
    }
}

/// Transition guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Guard {
    /// Always true
    Always,
    /// Up button press event
    UpPressed,
    /// Down button press event
    DownPressed,
    /// Up press event without a down press event
    UpOnlyPressed,
    /// Either button press event
    AnyPressed,
    /// Both buttons held past the both-held run
    BothHeld,
    /// Both buttons held and the window has elapsed
    BothHeldFor(Window),
    /// At least one button released (both-held no longer true)
    Released,
    /// At least one button released, or the window has elapsed
    ReleasedOrElapsed(Window),
    /// Either button press event, or the window has elapsed
    AnyPressedOrElapsed(Window),
    /// Window has elapsed
    Elapsed(Window),
    /// Retracted sensor active
    RetractedActive,
    /// Retracted position no longer confirmed (sensor lost, or both
    /// sensors active)
    RetractedLost,
    /// Extended sensor active
    ExtendedActive,
    /// Extended position no longer confirmed (sensor lost, or both
    /// sensors active)
    ExtendedLost,
    /// Retracted active and extended not active
    AtRetracted,
    /// Extended active and retracted not active
    AtExtended,
    /// Both position sensors active at once
    SensorsConflict,
    /// Emergency line released and both buttons held
    EmergencyAcknowledged,
}

/// Data a guard may look at
#[derive(Debug, Clone, Copy)]
pub struct GuardContext<'a> {
    pub snapshot: &'a Snapshot,
    /// Time spent in the current state
    pub elapsed_ms: u32,
    pub timing: &'a TimingConfig,
}

impl GuardContext<'_> {
    fn elapsed(&self, window: Window) -> bool {
        self.elapsed_ms >= window.duration_ms(self.timing)
    }
}

impl Guard {
    /// Evaluate the guard; total and side-effect free
    pub fn holds(&self, ctx: &GuardContext<'_>) -> bool {
        let inputs = &ctx.snapshot.inputs;
        let sensors = &ctx.snapshot.sensors;

        match *self {
            Guard::Always => true,
            Guard::UpPressed => inputs.up_pressed,
            Guard::DownPressed => inputs.down_pressed,
            Guard::UpOnlyPressed => inputs.up_pressed && !inputs.down_pressed,
            Guard::AnyPressed => ctx.snapshot.any_pressed(),
            Guard::BothHeld => inputs.both_held,
            Guard::BothHeldFor(w) => inputs.both_held && ctx.elapsed(w),
            Guard::Released => !inputs.both_held,
            Guard::ReleasedOrElapsed(w) => !inputs.both_held || ctx.elapsed(w),
            Guard::AnyPressedOrElapsed(w) => ctx.snapshot.any_pressed() || ctx.elapsed(w),
            Guard::Elapsed(w) => ctx.elapsed(w),
            Guard::RetractedActive => sensors.retracted_active,
            Guard::RetractedLost => !sensors.at_retracted(),
            Guard::ExtendedActive => sensors.extended_active,
            Guard::ExtendedLost => !sensors.at_extended(),
            Guard::AtRetracted => sensors.at_retracted(),
            Guard::AtExtended => sensors.at_extended(),
            Guard::SensorsConflict => sensors.conflicting(),
            Guard::EmergencyAcknowledged => !inputs.emergency_asserted && inputs.both_held,
        }
    }
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub guard: Guard,
    pub target: State,
}

impl Rule {
    const fn new(guard: Guard, target: State) -> Self {
        Self { guard, target }
    }
}

const INIT: &[Rule] = &[Rule::new(Guard::Always, State::Calibrating)];

const RETRACTED: &[Rule] = &[
    Rule::new(Guard::DownPressed, State::Extending),
    Rule::new(Guard::RetractedLost, State::NoPosition),
];

const PRERETRACTING: &[Rule] = &[
    Rule::new(Guard::Elapsed(Window::DelayToMiddle), State::Retracting),
    Rule::new(Guard::AnyPressed, State::NoPosition),
];

const RETRACTING: &[Rule] = &[
    Rule::new(Guard::SensorsConflict, State::NoPosition),
    Rule::new(Guard::RetractedActive, State::Retracted),
    Rule::new(
        Guard::AnyPressedOrElapsed(Window::MoveTimeout),
        State::NoPosition,
    ),
];

const EXTENDING: &[Rule] = &[
    Rule::new(Guard::SensorsConflict, State::NoPosition),
    Rule::new(Guard::ExtendedActive, State::Extended),
    Rule::new(
        Guard::AnyPressedOrElapsed(Window::MoveTimeout),
        State::NoPosition,
    ),
];

const EXTENDED: &[Rule] = &[
    Rule::new(Guard::UpOnlyPressed, State::PreRetracting),
    Rule::new(Guard::BothHeld, State::PreCalibrating),
    Rule::new(Guard::ExtendedLost, State::NoPosition),
];

const PRECALIBRATING: &[Rule] = &[
    Rule::new(Guard::Released, State::Extended),
    Rule::new(
        Guard::BothHeldFor(Window::PrecalibrateConfirm),
        State::Calibrating,
    ),
];

const CALIBRATING: &[Rule] = &[Rule::new(
    Guard::ReleasedOrElapsed(Window::Calibrate),
    State::NoPosition,
)];

const NO_POSITION: &[Rule] = &[
    Rule::new(Guard::AtExtended, State::Extended),
    Rule::new(Guard::DownPressed, State::Extending),
    Rule::new(Guard::AtRetracted, State::Retracted),
    Rule::new(Guard::UpPressed, State::PreRetracting),
];

const EMERGENCY_STOP: &[Rule] = &[Rule::new(
    Guard::EmergencyAcknowledged,
    State::Calibrating,
)];

/// Ordered rule list for a state
pub fn rules(state: State) -> &'static [Rule] {
    match state {
        State::Init => INIT,
        State::Retracted => RETRACTED,
        State::Retracting => RETRACTING,
        State::PreRetracting => PRERETRACTING,
        State::Extended => EXTENDED,
        State::Extending => EXTENDING,
        State::NoPosition => NO_POSITION,
        State::PreCalibrating => PRECALIBRATING,
        State::Calibrating => CALIBRATING,
        State::EmergencyStop => EMERGENCY_STOP,
    }
}

/// Evaluate a state's rules in order; the first true guard wins
pub fn evaluate(state: State, ctx: &GuardContext<'_>) -> Option<State> {
    rules(state)
        .iter()
        .find(|rule| rule.guard.holds(ctx))
        .map(|rule| rule.target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{OperatorInputs, PositionSensors};

    fn snapshot(inputs: OperatorInputs, sensors: PositionSensors) -> Snapshot {
        Snapshot::new(inputs, sensors)
    }

    fn eval(state: State, snap: &Snapshot, elapsed_ms: u32) -> Option<State> {
        let timing = TimingConfig {
            move_timeout_s: 15,
            delay_to_middle_s: 5,
        };
        let ctx = GuardContext {
            snapshot: snap,
            elapsed_ms,
            timing: &timing,
        };
        evaluate(state, &ctx)
    }

    fn up() -> OperatorInputs {
        OperatorInputs {
            up_pressed: true,
            ..Default::default()
        }
    }

    fn down() -> OperatorInputs {
        OperatorInputs {
            down_pressed: true,
            ..Default::default()
        }
    }

    fn held() -> OperatorInputs {
        OperatorInputs {
            both_held: true,
            ..Default::default()
        }
    }

    fn retracted() -> PositionSensors {
        PositionSensors {
            retracted_active: true,
            extended_active: false,
        }
    }

    fn extended() -> PositionSensors {
        PositionSensors {
            retracted_active: false,
            extended_active: true,
        }
    }

    fn both_active() -> PositionSensors {
        PositionSensors {
            retracted_active: true,
            extended_active: true,
        }
    }

    #[test]
    fn test_every_state_has_rules() {
        for state in State::ALL {
            assert!(!rules(state).is_empty(), "{:?} has no exit", state);
        }
    }

    #[test]
    fn test_init_is_unconditional() {
        let snap = Snapshot::default();
        assert_eq!(eval(State::Init, &snap, 0), Some(State::Calibrating));
    }

    #[test]
    fn test_retracted_rules() {
        let snap = snapshot(down(), retracted());
        assert_eq!(eval(State::Retracted, &snap, 0), Some(State::Extending));

        let snap = snapshot(OperatorInputs::default(), retracted());
        assert_eq!(eval(State::Retracted, &snap, 0), None);

        let snap = snapshot(OperatorInputs::default(), PositionSensors::default());
        assert_eq!(eval(State::Retracted, &snap, 0), Some(State::NoPosition));
    }

    #[test]
    fn test_preretracting_delay() {
        let snap = Snapshot::default();
        assert_eq!(eval(State::PreRetracting, &snap, 4_999), None);
        assert_eq!(
            eval(State::PreRetracting, &snap, 5_001),
            Some(State::Retracting)
        );

        let snap = snapshot(down(), PositionSensors::default());
        assert_eq!(
            eval(State::PreRetracting, &snap, 100),
            Some(State::NoPosition)
        );
    }

    #[test]
    fn test_motion_timeout() {
        let snap = Snapshot::default();
        assert_eq!(eval(State::Retracting, &snap, 14_999), None);
        assert_eq!(
            eval(State::Retracting, &snap, 15_001),
            Some(State::NoPosition)
        );
        assert_eq!(
            eval(State::Extending, &snap, 15_001),
            Some(State::NoPosition)
        );
    }

    #[test]
    fn test_sensor_beats_timeout() {
        // Order matters: arriving wins over timing out on the same tick
        let snap = snapshot(OperatorInputs::default(), retracted());
        assert_eq!(
            eval(State::Retracting, &snap, 20_000),
            Some(State::Retracted)
        );
        let snap = snapshot(OperatorInputs::default(), extended());
        assert_eq!(eval(State::Extending, &snap, 20_000), Some(State::Extended));
    }

    #[test]
    fn test_conflicting_sensors_leave_terminal_states() {
        let snap = snapshot(OperatorInputs::default(), both_active());
        assert_eq!(eval(State::Retracted, &snap, 0), Some(State::NoPosition));
        assert_eq!(eval(State::Extended, &snap, 0), Some(State::NoPosition));
    }

    #[test]
    fn test_conflicting_sensors_stop_motion() {
        let snap = snapshot(OperatorInputs::default(), both_active());
        assert_eq!(eval(State::Retracting, &snap, 10), Some(State::NoPosition));
        assert_eq!(eval(State::Extending, &snap, 10), Some(State::NoPosition));
    }

    #[test]
    fn test_press_aborts_motion() {
        let snap = snapshot(up(), PositionSensors::default());
        assert_eq!(eval(State::Extending, &snap, 10), Some(State::NoPosition));
    }

    #[test]
    fn test_extended_rules() {
        let snap = snapshot(up(), extended());
        assert_eq!(
            eval(State::Extended, &snap, 0),
            Some(State::PreRetracting)
        );

        let snap = snapshot(held(), extended());
        assert_eq!(
            eval(State::Extended, &snap, 0),
            Some(State::PreCalibrating)
        );

        let snap = snapshot(OperatorInputs::default(), PositionSensors::default());
        assert_eq!(eval(State::Extended, &snap, 0), Some(State::NoPosition));
    }

    #[test]
    fn test_precalibrating_rules() {
        let snap = snapshot(held(), extended());
        assert_eq!(eval(State::PreCalibrating, &snap, 4_000), None);
        assert_eq!(
            eval(State::PreCalibrating, &snap, PRECALIBRATE_CONFIRM_MS - BOTH_HOLD_LEAD_MS - 1),
            None
        );
        assert_eq!(
            eval(State::PreCalibrating, &snap, PRECALIBRATE_CONFIRM_MS - BOTH_HOLD_LEAD_MS),
            Some(State::Calibrating)
        );
        assert_eq!(
            eval(State::PreCalibrating, &snap, 5_000),
            Some(State::Calibrating)
        );

        let snap = snapshot(OperatorInputs::default(), extended());
        assert_eq!(
            eval(State::PreCalibrating, &snap, 4_000),
            Some(State::Extended)
        );
    }

    #[test]
    fn test_calibrating_window() {
        let snap = snapshot(held(), extended());
        assert_eq!(eval(State::Calibrating, &snap, 2_999), None);
        assert_eq!(
            eval(State::Calibrating, &snap, 3_001),
            Some(State::NoPosition)
        );

        let snap = Snapshot::default();
        assert_eq!(eval(State::Calibrating, &snap, 0), Some(State::NoPosition));
    }

    #[test]
    fn test_no_position_resolution() {
        let snap = snapshot(OperatorInputs::default(), extended());
        assert_eq!(eval(State::NoPosition, &snap, 0), Some(State::Extended));

        let snap = snapshot(OperatorInputs::default(), retracted());
        assert_eq!(eval(State::NoPosition, &snap, 0), Some(State::Retracted));

        let snap = snapshot(OperatorInputs::default(), both_active());
        assert_eq!(eval(State::NoPosition, &snap, 0), None);

        let snap = snapshot(down(), both_active());
        assert_eq!(eval(State::NoPosition, &snap, 0), Some(State::Extending));

        let snap = snapshot(up(), PositionSensors::default());
        assert_eq!(
            eval(State::NoPosition, &snap, 0),
            Some(State::PreRetracting)
        );
    }

    #[test]
    fn test_emergency_exit_needs_acknowledge() {
        let asserted = OperatorInputs {
            emergency_asserted: true,
            both_held: true,
            ..Default::default()
        };
        let snap = snapshot(asserted, PositionSensors::default());
        assert_eq!(eval(State::EmergencyStop, &snap, 60_000), None);

        let snap = Snapshot::default();
        assert_eq!(eval(State::EmergencyStop, &snap, 60_000), None);

        let snap = snapshot(held(), PositionSensors::default());
        assert_eq!(
            eval(State::EmergencyStop, &snap, 0),
            Some(State::Calibrating)
        );
    }

    #[test]
    fn test_window_for_state() {
        let timing = TimingConfig::default();
        for state in State::ALL {
            assert_eq!(Window::for_state(state).is_some(), state.is_timed());
        }
        assert_eq!(
            Window::for_state(State::Calibrating).map(|w| w.duration_ms(&timing)),
            Some(CALIBRATE_WINDOW_MS)
        );
    }
}
