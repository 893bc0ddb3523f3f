//! Actuator command model
//!
//! State entry and exit actions are expressed as an ordered batch of
//! commands. The batch is executed in order by whoever owns the
//! hardware; every command reports success or failure individually.

use heapless::Vec;

use crate::config::MoveCounter;

/// Maximum commands in one tick's batch
pub const MAX_COMMANDS: usize = 16;

/// Ordered command batch for one tick
pub type CommandBatch = Vec<Command, MAX_COMMANDS>;

/// Physical or persisted output a command drives
///
/// A newer command for the same output supersedes an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Output {
    LiftPower,
    LiftUp,
    LiftDown,
    Dmc,
    Azimuth,
    Counter(MoveCounter),
}

/// One actuator call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    LiftEnable,
    LiftDisable,
    LiftUpOn,
    LiftUpOff,
    LiftDownOn,
    LiftDownOff,
    DmcEnable,
    DmcDisable,
    AzimuthEnable,
    AzimuthDisable,
    /// Persist one increment of a move counter
    BumpCounter(MoveCounter),
}

impl Command {
    /// Output driven by this command
    pub fn output(&self) -> Output {
        match self {
            Command::LiftEnable | Command::LiftDisable => Output::LiftPower,
            Command::LiftUpOn | Command::LiftUpOff => Output::LiftUp,
            Command::LiftDownOn | Command::LiftDownOff => Output::LiftDown,
            Command::DmcEnable | Command::DmcDisable => Output::Dmc,
            Command::AzimuthEnable | Command::AzimuthDisable => Output::Azimuth,
            Command::BumpCounter(c) => Output::Counter(*c),
        }
    }

    /// Counter increments accumulate and are never superseded
    pub fn is_cumulative(&self) -> bool {
        matches!(self, Command::BumpCounter(_))
    }

    /// Command releases propulsion or steering
    pub fn releases_drive(&self) -> bool {
        matches!(self, Command::DmcEnable | Command::AzimuthEnable)
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::LiftEnable => "lift.enable",
            Command::LiftDisable => "lift.disable",
            Command::LiftUpOn => "lift.up_on",
            Command::LiftUpOff => "lift.up_off",
            Command::LiftDownOn => "lift.down_on",
            Command::LiftDownOff => "lift.down_off",
            Command::DmcEnable => "dmc.enable",
            Command::DmcDisable => "dmc.disable",
            Command::AzimuthEnable => "azimuth.enable",
            Command::AzimuthDisable => "azimuth.disable",
            Command::BumpCounter(MoveCounter::Retracted) => "counter.retracted",
            Command::BumpCounter(MoveCounter::Extended) => "counter.extended",
        }
    }
}

/// Append a command unless an identical idempotent command is already queued
///
/// Returns `false` if the batch is full.
pub fn push_unique(batch: &mut CommandBatch, cmd: Command) -> bool {
    if !cmd.is_cumulative() && batch.contains(&cmd) {
        return true;
    }
    batch.push(cmd).is_ok()
}
