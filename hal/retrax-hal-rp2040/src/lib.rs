//! RP2040-specific HAL for the lift controller firmware
//!
//! Provides the RP2040 implementation of the shared `retrax-hal`
//! traits:
//!
//! - Flash storage driver (implements `retrax_hal::FlashStorage`)

#![no_std]

pub mod flash;
