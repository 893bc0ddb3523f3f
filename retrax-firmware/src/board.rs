//! Board pin assignment
//!
//! | Signal | Pin | Level |
//! |---|---|---|
//! | Up button | GPIO2 | active low, pull-up |
//! | Down button | GPIO3 | active low, pull-up |
//! | Emergency line | GPIO4 | NC contact to ground, open reads as asserted |
//! | Retracted sensor | GPIO5 | active high |
//! | Extended sensor | GPIO6 | active high |
//! | Up button LED | GPIO14 | active high |
//! | Down button LED | GPIO15 | active high |
//! | DMC enable | GPIO16 | active high |
//! | Azimuth enable | GPIO17 | active high |
//! | I2C0 SDA / SCL | GPIO20 / GPIO21 | PCF8574 lift expander |

use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;

use retrax_core::actuator::Plant;
use retrax_drivers::lift::Pcf8574Lift;
use retrax_drivers::switch::GpioSwitch;

use crate::config::SharedStore;

/// I2C bus clock for the expander
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// Active level of each input line (true = asserted when the pin is high)
#[derive(Debug, Clone, Copy)]
pub struct InputLevels {
    pub up_high: bool,
    pub down_high: bool,
    pub emergency_high: bool,
    pub retracted_high: bool,
    pub extended_high: bool,
}

impl Default for InputLevels {
    fn default() -> Self {
        Self {
            up_high: false,
            down_high: false,
            emergency_high: true,
            retracted_high: true,
            extended_high: true,
        }
    }
}

pub type BoardLift = Pcf8574Lift<I2c<'static, I2C0, Async>>;
pub type BoardSwitch = GpioSwitch<Output<'static>>;
pub type BoardPlant = Plant<BoardLift, BoardSwitch, BoardSwitch, SharedStore>;
