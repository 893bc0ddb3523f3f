//! Actuator coordination
//!
//! Turns transitions into ordered command batches, executes them against
//! the subordinate subsystems and tracks failed commands for retry.

pub mod actions;
pub mod command;
pub mod coordinator;
pub mod plant;

pub use actions::{entry_commands, entry_counter, exit_commands};
pub use command::{push_unique, Command, CommandBatch, Output, MAX_COMMANDS};
pub use coordinator::{Coordinator, RoundSummary, MAX_PENDING};
pub use plant::Plant;
