//! Safety monitor implementation
//!
//! Monitors the emergency line and the health of actuator dispatch.

use crate::actuator::RoundSummary;

/// Consecutive failing dispatch rounds before the actuator fault latches
pub const MAX_FAILED_ROUNDS: u8 = 3;

/// Kind of safety fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Emergency line asserted
    EmergencyStop,
    /// Actuator commands kept failing
    ActuatorFailure,
}

/// Safety condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// All conditions normal
    Ok,
    /// Safety condition violated
    Fault(FaultKind),
}

/// Safety monitor for fault detection
#[derive(Debug, Clone, Default)]
pub struct SafetyMonitor {
    /// Emergency line level from the latest snapshot
    emergency: bool,
    /// Consecutive rounds with at least one failed command
    failed_rounds: u8,
}

impl SafetyMonitor {
    /// Create a new safety monitor
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the emergency line level
    pub fn update_emergency(&mut self, asserted: bool) {
        self.emergency = asserted;
    }

    /// Account for a closed dispatch round
    ///
    /// A fully successful round clears the failure streak.
    pub fn record_round(&mut self, summary: &RoundSummary) {
        if summary.ok() {
            self.failed_rounds = 0;
        } else {
            self.failed_rounds = self.failed_rounds.saturating_add(1);
        }
    }

    /// Check all safety conditions
    ///
    /// Returns the first fault detected; the emergency line wins.
    pub fn check(&self) -> SafetyStatus {
        if self.emergency {
            return SafetyStatus::Fault(FaultKind::EmergencyStop);
        }

        if self.actuator_faulted() {
            return SafetyStatus::Fault(FaultKind::ActuatorFailure);
        }

        SafetyStatus::Ok
    }

    /// Persistent actuator failure latched
    pub fn actuator_faulted(&self) -> bool {
        self.failed_rounds >= MAX_FAILED_ROUNDS
    }

    /// Current failure streak
    pub fn failed_rounds(&self) -> u8 {
        self.failed_rounds
    }
}
