//! Lift motor trait

use core::future::Future;

use super::StorageError;

/// Errors from actuator operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Bus transaction failed (I2C NAK, arbitration loss, GPIO error)
    Bus,
    /// Call did not complete within the actuator timeout
    Timeout,
    /// Persisting a counter failed
    Storage,
}

impl From<StorageError> for ActuatorError {
    fn from(_: StorageError) -> Self {
        ActuatorError::Storage
    }
}

/// Lift motor with separate up/down outputs and a power enable
///
/// Every call is a potentially blocking bus operation and reports
/// failure; callers must not assume a command took effect.
pub trait Lift {
    /// Power the lift motor driver
    fn enable(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Remove power from the lift motor driver
    fn disable(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Check if the lift motor driver is powered
    fn enabled(&mut self) -> impl Future<Output = Result<bool, ActuatorError>>;

    /// Energize the up output
    fn up_on(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// De-energize the up output
    fn up_off(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Energize the down output
    fn down_on(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// De-energize the down output
    fn down_off(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Check if the up output is energized
    fn up_moving(&mut self) -> impl Future<Output = Result<bool, ActuatorError>>;

    /// Check if the down output is energized
    fn down_moving(&mut self) -> impl Future<Output = Result<bool, ActuatorError>>;
}
