//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in retrax-core for the lift controller board:
//!
//! - Lift motor outputs on a PCF8574 I2C expander
//! - GPIO enable lines (DMC, azimuth)
//! - Button LED indication
//! - RAM-backed key/value store

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod indicator;
pub mod lift;
pub mod storage;
pub mod switch;
