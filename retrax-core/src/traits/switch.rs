//! Enable-line subsystems
//!
//! Azimuth steering output and drive-motor-clutch enable are both plain
//! enable/disable lines. Disabling an already disabled output must
//! succeed without side effects.

use core::future::Future;

use super::ActuatorError;

/// Azimuth steering output enable
pub trait Azimuth {
    /// Release the steering output
    fn enable(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Block the steering output
    fn disable(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Check if the steering output is released
    fn enabled(&mut self) -> impl Future<Output = Result<bool, ActuatorError>>;
}

/// Drive-motor-clutch enable
///
/// Gates vehicle propulsion; only released while the lift is extended.
pub trait Dmc {
    /// Release the drive motor clutch
    fn enable(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Block the drive motor clutch
    fn disable(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Check if the drive motor clutch is released
    fn enabled(&mut self) -> impl Future<Output = Result<bool, ActuatorError>>;
}
