//! Actuator plant
//!
//! Bundles the subordinate subsystems and executes single commands on
//! them.

use super::command::Command;
use crate::traits::{ActuatorError, Azimuth, Dmc, Lift, Storage};

/// The set of collaborators a command batch is executed against
pub struct Plant<L, A, D, S> {
    pub lift: L,
    pub azimuth: A,
    pub dmc: D,
    pub store: S,
}

impl<L, A, D, S> Plant<L, A, D, S>
where
    L: Lift,
    A: Azimuth,
    D: Dmc,
    S: Storage,
{
    pub fn new(lift: L, azimuth: A, dmc: D, store: S) -> Self {
        Self {
            lift,
            azimuth,
            dmc,
            store,
        }
    }

    /// Execute one command
    pub async fn apply(&mut self, cmd: Command) -> Result<(), ActuatorError> {
        match cmd {
            Command::LiftEnable => self.lift.enable().await,
            Command::LiftDisable => self.lift.disable().await,
            Command::LiftUpOn => self.lift.up_on().await,
            Command::LiftUpOff => self.lift.up_off().await,
            Command::LiftDownOn => self.lift.down_on().await,
            Command::LiftDownOff => self.lift.down_off().await,
            Command::DmcEnable => self.dmc.enable().await,
            Command::DmcDisable => self.dmc.disable().await,
            Command::AzimuthEnable => self.azimuth.enable().await,
            Command::AzimuthDisable => self.azimuth.disable().await,
            Command::BumpCounter(counter) => {
                counter.increment_in(&mut self.store)?;
                Ok(())
            }
        }
    }
}
