//! Dispatch round bookkeeping
//!
//! Each tick opens a round: commands that failed in the previous round
//! are re-issued ahead of the new batch, unless a newer command for the
//! same output supersedes them. Counter increments are cumulative and
//! always retried.

use heapless::Vec;

use super::command::{Command, CommandBatch};
use crate::traits::ActuatorError;

/// Maximum failed commands carried into the next round
pub const MAX_PENDING: usize = 8;

/// Outcome of a closed round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoundSummary {
    pub issued: u8,
    pub failed: u8,
    /// Failures that did not fit the retry queue
    pub dropped: u8,
}

impl RoundSummary {
    /// Every issued command succeeded
    pub fn ok(&self) -> bool {
        self.failed == 0
    }
}

/// Retry queue for actuator commands
#[derive(Debug, Clone, Default)]
pub struct Coordinator {
    pending: Vec<Command, MAX_PENDING>,
    failed: Vec<Command, MAX_PENDING>,
    open: Option<RoundSummary>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands waiting for a retry
    pub fn pending(&self) -> &[Command] {
        &self.pending
    }

    /// Forget queued counter increments
    ///
    /// Used when the counters are reset; a late retry would count a move
    /// from before the reset.
    pub fn discard_counters(&mut self) {
        self.pending.retain(|cmd| !cmd.is_cumulative());
        self.failed.retain(|cmd| !cmd.is_cumulative());
    }

    /// A round was planned and not yet closed
    pub fn round_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open a round: retries first, then the fresh batch
    pub fn plan(&mut self, fresh: &CommandBatch) -> CommandBatch {
        let mut batch = CommandBatch::new();

        for cmd in self.pending.iter() {
            let superseded =
                !cmd.is_cumulative() && fresh.iter().any(|f| f.output() == cmd.output());
            if !superseded && batch.push(*cmd).is_err() {
                break;
            }
        }
        self.pending.clear();

        let mut dropped = 0u8;
        for cmd in fresh.iter() {
            if batch.push(*cmd).is_err() {
                dropped = dropped.saturating_add(1);
            }
        }

        self.failed.clear();
        self.open = Some(RoundSummary {
            issued: batch.len() as u8,
            failed: 0,
            dropped,
        });
        batch
    }

    /// Record the result of one command of the open round
    pub fn record(&mut self, cmd: Command, result: Result<(), ActuatorError>) {
        if result.is_ok() {
            return;
        }
        let summary = self.open.get_or_insert_with(RoundSummary::default);
        summary.failed = summary.failed.saturating_add(1);
        if self.failed.push(cmd).is_err() {
            summary.dropped = summary.dropped.saturating_add(1);
        }
    }

    /// Close the open round, queueing its failures for the next one
    pub fn finish(&mut self) -> RoundSummary {
        let summary = self.open.take().unwrap_or_default();
        self.pending.clear();
        for cmd in self.failed.iter() {
            // Only the newest failure per output is worth retrying
            if !cmd.is_cumulative() {
                if let Some(pos) = self.pending.iter().position(|p| p.output() == cmd.output()) {
                    self.pending[pos] = *cmd;
                    continue;
                }
            }
            let _ = self.pending.push(*cmd);
        }
        self.failed.clear();
        summary
    }
}
