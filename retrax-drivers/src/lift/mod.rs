//! Lift motor drivers

pub mod pcf8574;

pub use pcf8574::{LiftPins, Pcf8574Lift, PCF8574_DEFAULT_ADDRESS};
