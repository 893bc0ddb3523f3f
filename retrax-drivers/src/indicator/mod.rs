//! Operator indication drivers

pub mod led;

pub use led::LedPair;
