//! Board-agnostic core logic for the lift controller firmware
//!
//! This crate contains all supervisory logic that does not depend on
//! specific hardware implementations:
//!
//! - State machine engine and its declarative transition table
//! - Debounced operator input sampling
//! - Per-state timers
//! - Actuator command model, dispatch and retry bookkeeping
//! - Safety monitoring (emergency line, persistent actuator faults)
//! - Operator indication patterns
//! - Configuration loading from the key/value storage collaborator
//! - Hardware abstraction traits (lift, azimuth, DMC, storage)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod actuator;
pub mod config;
pub mod controller;
pub mod indication;
pub mod input;
pub mod safety;
pub mod state;
pub mod timer;
pub mod traits;

pub use controller::{Controller, StatusSnapshot, TickOutcome, Transition};
