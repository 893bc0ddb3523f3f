//! Supervisory controller
//!
//! The controller is the single owner of the lift state. Once per tick it:
//! - Closes the previous dispatch round and updates fault tracking
//! - Evaluates the emergency guard, then a latched actuator fault, then
//!   the current state's transition rules
//! - On a transition, runs the exit and entry actions
//! - Opens a new dispatch round (retries plus the new commands)
//!
//! Command execution is left to the caller, so the same controller runs
//! against real hardware with per-call timeouts or against mocks.

use crate::actuator::{
    entry_commands, exit_commands, Command, CommandBatch, Coordinator, Plant, RoundSummary,
};
use crate::config::{MoveCounters, TimingConfig};
use crate::indication::Indication;
use crate::input::Snapshot;
use crate::safety::{FaultKind, SafetyMonitor, SafetyStatus};
use crate::state::{evaluate, GuardContext, State, Window};
use crate::timer::StateTimer;
use crate::traits::{ActuatorError, Azimuth, Dmc, Lift, Storage, StorageError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A state change taken during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: State,
    pub to: State,
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    pub transition: Option<Transition>,
    /// Commands to execute in order, retries first
    pub commands: CommandBatch,
}

/// Read-only view for the status surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusSnapshot {
    pub state: State,
    pub indication: Indication,
    pub counters: MoveCounters,
    /// Time left in a timed state
    pub remaining_ms: Option<u32>,
    pub calibrating: bool,
    pub actuator_fault: bool,
}

/// Lift supervisory controller
pub struct Controller {
    /// Current state
    state: State,
    /// Entry timestamp of the current state
    timer: StateTimer,
    /// Timing tunables, cached at boot
    timing: TimingConfig,
    /// Mirror of the persisted move counters
    counters: MoveCounters,
    /// Calibration in progress
    calibrating: bool,
    /// Safety monitor
    safety: SafetyMonitor,
    /// Retry bookkeeping
    coordinator: Coordinator,
    /// Last closed round
    last_round: RoundSummary,
}

impl Controller {
    /// Create a controller in INIT and run the INIT entry action
    ///
    /// Returns the entry commands as the first dispatch round.
    pub fn new(timing: TimingConfig, counters: MoveCounters, now_ms: u32) -> (Self, CommandBatch) {
        let mut ctrl = Self {
            state: State::Init,
            timer: StateTimer::started_at(now_ms),
            timing,
            counters,
            calibrating: false,
            safety: SafetyMonitor::new(),
            coordinator: Coordinator::new(),
            last_round: RoundSummary::default(),
        };

        let mut fresh = CommandBatch::new();
        entry_commands(State::Init, &Default::default(), &mut fresh);
        let commands = ctrl.coordinator.plan(&fresh);
        (ctrl, commands)
    }

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Get cached timing configuration
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Get counter mirror
    pub fn counters(&self) -> &MoveCounters {
        &self.counters
    }

    /// Check if calibration is in progress
    pub fn calibrating(&self) -> bool {
        self.calibrating
    }

    /// Indication for the current state
    pub fn indication(&self) -> Indication {
        self.state.indication()
    }

    /// Check if a persistent actuator failure is latched
    pub fn actuator_faulted(&self) -> bool {
        self.safety.actuator_faulted()
    }

    /// Summary of the last closed dispatch round
    pub fn last_round(&self) -> RoundSummary {
        self.last_round
    }

    /// Commands carried over for retry into the next round
    pub fn pending_retries(&self) -> usize {
        self.coordinator.pending().len()
    }

    /// Time spent in the current state
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        self.timer.elapsed_ms(now_ms)
    }

    /// Run one controller tick
    ///
    /// At most one transition is taken per tick.
    pub fn tick(&mut self, snapshot: &Snapshot, now_ms: u32) -> TickOutcome {
        if self.coordinator.round_open() {
            self.finish_round();
        }

        self.safety
            .update_emergency(snapshot.inputs.emergency_asserted);

        let mut fresh = CommandBatch::new();
        let transition = match self.next_state(snapshot, now_ms) {
            Some(to) if to != self.state => {
                let from = self.state;
                exit_commands(from, &mut fresh);
                if from == State::Calibrating {
                    self.calibrating = false;
                }
                self.enter(to, snapshot, now_ms, &mut fresh);
                Some(Transition { from, to })
            }
            _ => None,
        };

        TickOutcome {
            transition,
            commands: self.coordinator.plan(&fresh),
        }
    }

    /// Record the result of one command from the current round
    pub fn record(&mut self, cmd: Command, result: Result<(), ActuatorError>) {
        self.coordinator.record(cmd, result);
    }

    /// Close the current round and update fault tracking
    pub fn finish_round(&mut self) -> RoundSummary {
        let summary = self.coordinator.finish();
        self.safety.record_round(&summary);
        self.last_round = summary;
        summary
    }

    /// Execute a round's commands in order against a plant and close it
    pub async fn dispatch<L, A, D, S>(
        &mut self,
        commands: &CommandBatch,
        plant: &mut Plant<L, A, D, S>,
    ) -> RoundSummary
    where
        L: Lift,
        A: Azimuth,
        D: Dmc,
        S: Storage,
    {
        for cmd in commands.iter() {
            let result = plant.apply(*cmd).await;
            self.record(*cmd, result);
        }
        self.finish_round()
    }

    /// Factory reset of both move counters
    ///
    /// Counter bumps still queued for retry are dropped so they cannot
    /// land on top of the zeroed values.
    pub fn reset_counters<S: Storage>(&mut self, store: &mut S) -> Result<(), StorageError> {
        self.coordinator.discard_counters();
        self.counters.reset(store)
    }

    /// Build the status view
    pub fn status(&self, now_ms: u32) -> StatusSnapshot {
        let remaining_ms = Window::for_state(self.state)
            .map(|w| self.timer.remaining_ms(now_ms, w.duration_ms(&self.timing)));

        StatusSnapshot {
            state: self.state,
            indication: self.indication(),
            counters: self.counters,
            remaining_ms,
            calibrating: self.calibrating,
            actuator_fault: self.safety.actuator_faulted(),
        }
    }

    fn next_state(&self, snapshot: &Snapshot, now_ms: u32) -> Option<State> {
        match self.safety.check() {
            SafetyStatus::Fault(FaultKind::EmergencyStop) => return Some(State::EmergencyStop),
            // An emergency stop is only left by operator acknowledge
            SafetyStatus::Fault(FaultKind::ActuatorFailure) if self.state != State::EmergencyStop => {
                return Some(State::NoPosition)
            }
            _ => {}
        }

        let ctx = GuardContext {
            snapshot,
            elapsed_ms: self.timer.elapsed_ms(now_ms),
            timing: &self.timing,
        };
        evaluate(self.state, &ctx)
    }

    fn enter(&mut self, to: State, snapshot: &Snapshot, now_ms: u32, fresh: &mut CommandBatch) {
        self.state = to;
        self.timer.restart(now_ms);
        if to == State::Calibrating {
            self.calibrating = true;
        }

        let start = fresh.len();
        entry_commands(to, &snapshot.sensors, fresh);
        for cmd in fresh[start..].iter() {
            if let Command::BumpCounter(counter) = cmd {
                self.counters.bump(*counter);
            }
        }
    }
}
