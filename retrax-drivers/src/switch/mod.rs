//! Enable-line drivers

pub mod gpio;

pub use gpio::GpioSwitch;
