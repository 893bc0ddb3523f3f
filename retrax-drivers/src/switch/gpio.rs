//! GPIO enable line
//!
//! Drives the drive-motor-clutch or azimuth enable through a single
//! GPIO pin, directly or via a relay/optocoupler.

use embedded_hal::digital::OutputPin;
use retrax_core::traits::{ActuatorError, Azimuth, Dmc};

/// GPIO enable line
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioSwitch<P> {
    pin: P,
    /// If true, enabled = pin LOW
    inverted: bool,
    /// Last logical state the pin was driven to
    on: bool,
}

impl<P: OutputPin> GpioSwitch<P> {
    /// Create a new enable line, driven to disabled
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the line is enabled when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Result<Self, ActuatorError> {
        let mut switch = Self {
            pin,
            inverted,
            on: false,
        };
        switch.set(false)?;
        Ok(switch)
    }

    /// Create a new enable line with active-high output
    pub fn new_active_high(pin: P) -> Result<Self, ActuatorError> {
        Self::new(pin, false)
    }

    /// Create a new enable line with active-low output
    pub fn new_active_low(pin: P) -> Result<Self, ActuatorError> {
        Self::new(pin, true)
    }

    /// Check the last driven logical state
    pub fn is_on(&self) -> bool {
        self.on
    }

    fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| ActuatorError::Bus)?;
        self.on = on;
        Ok(())
    }
}

impl<P: OutputPin> Dmc for GpioSwitch<P> {
    async fn enable(&mut self) -> Result<(), ActuatorError> {
        self.set(true)
    }

    async fn disable(&mut self) -> Result<(), ActuatorError> {
        self.set(false)
    }

    async fn enabled(&mut self) -> Result<bool, ActuatorError> {
        Ok(self.on)
    }
}

impl<P: OutputPin> Azimuth for GpioSwitch<P> {
    async fn enable(&mut self) -> Result<(), ActuatorError> {
        self.set(true)
    }

    async fn disable(&mut self) -> Result<(), ActuatorError> {
        self.set(false)
    }

    async fn enabled(&mut self) -> Result<bool, ActuatorError> {
        Ok(self.on)
    }
}
