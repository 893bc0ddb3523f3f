//! Persisted settings
//!
//! The controller reads and writes a RAM key/value store; this module
//! loads it from flash at boot and writes changed entries back.

pub mod persistence;
pub mod store;

pub use persistence::{ConfigError, SettingsPersistence};
pub use store::{PersistedEntries, SharedStore, Store, STORE_CAPACITY};
