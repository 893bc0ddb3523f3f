//! Supervisory state machine
//!
//! Defines the authoritative runtime behavior of the lift.
//! The state machine is explicit, finite, and deterministic.

pub mod machine;
pub mod rules;

pub use machine::State;
pub use rules::{evaluate, rules, Guard, GuardContext, Rule, Window};
