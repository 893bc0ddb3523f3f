//! Lift outputs on a PCF8574 I2C port expander
//!
//! The expander has no output register to read back: every write sends
//! the full 8-bit port value. A shadow copy of the port is kept and only
//! updated once the bus write succeeded, so a failed command leaves the
//! shadow matching the hardware and can simply be re-issued.
//!
//! Outputs are active-low (0 = relay energized). Power-on value is 0xFF.

use embedded_hal_async::i2c::I2c;
use retrax_core::traits::{ActuatorError, Lift};

/// Default 7-bit address (A2..A0 tied low)
pub const PCF8574_DEFAULT_ADDRESS: u8 = 0x20;

/// All outputs off
const PORT_IDLE: u8 = 0xFF;

/// Expander pin assignment for the lift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LiftPins {
    /// Motor driver power enable
    pub enable: u8,
    /// Up relay
    pub up: u8,
    /// Down relay
    pub down: u8,
}

impl Default for LiftPins {
    fn default() -> Self {
        Self {
            enable: 0,
            up: 1,
            down: 2,
        }
    }
}

/// Lift motor driven through a PCF8574
pub struct Pcf8574Lift<I2C> {
    i2c: I2C,
    address: u8,
    pins: LiftPins,
    /// Last port value acknowledged by the expander
    port: u8,
}

impl<I2C: I2c> Pcf8574Lift<I2C> {
    /// Create a new driver
    ///
    /// The port is assumed to be at its power-on value; call
    /// [`reset`](Self::reset) to force it.
    pub fn new(i2c: I2C, address: u8, pins: LiftPins) -> Self {
        Self {
            i2c,
            address,
            pins,
            port: PORT_IDLE,
        }
    }

    /// Drive every expander output off
    pub async fn reset(&mut self) -> Result<(), ActuatorError> {
        self.write_port(PORT_IDLE).await
    }

    /// Last acknowledged port value
    pub fn port(&self) -> u8 {
        self.port
    }

    fn is_on(&self, pin: u8) -> bool {
        self.port & (1 << pin) == 0
    }

    async fn set_pin(&mut self, pin: u8, on: bool) -> Result<(), ActuatorError> {
        let port = if on {
            self.port & !(1 << pin)
        } else {
            self.port | (1 << pin)
        };
        self.write_port(port).await
    }

    async fn write_port(&mut self, port: u8) -> Result<(), ActuatorError> {
        self.i2c
            .write(self.address, &[port])
            .await
            .map_err(|_| ActuatorError::Bus)?;
        self.port = port;
        Ok(())
    }
}

impl<I2C: I2c> Lift for Pcf8574Lift<I2C> {
    async fn enable(&mut self) -> Result<(), ActuatorError> {
        self.set_pin(self.pins.enable, true).await
    }

    async fn disable(&mut self) -> Result<(), ActuatorError> {
        self.set_pin(self.pins.enable, false).await
    }

    async fn enabled(&mut self) -> Result<bool, ActuatorError> {
        Ok(self.is_on(self.pins.enable))
    }

    async fn up_on(&mut self) -> Result<(), ActuatorError> {
        self.set_pin(self.pins.up, true).await
    }

    async fn up_off(&mut self) -> Result<(), ActuatorError> {
        self.set_pin(self.pins.up, false).await
    }

    async fn down_on(&mut self) -> Result<(), ActuatorError> {
        self.set_pin(self.pins.down, true).await
    }

    async fn down_off(&mut self) -> Result<(), ActuatorError> {
        self.set_pin(self.pins.down, false).await
    }

    async fn up_moving(&mut self) -> Result<bool, ActuatorError> {
        Ok(self.is_on(self.pins.up))
    }

    async fn down_moving(&mut self) -> Result<bool, ActuatorError> {
        Ok(self.is_on(self.pins.down))
    }
}
