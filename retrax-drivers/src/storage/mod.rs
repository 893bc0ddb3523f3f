//! Key/value store implementations

pub mod ram;

pub use ram::{RamStore, Value};
