//! Persisted move counters
//!
//! Two independent counters, incremented by exactly one per transition
//! into their associated terminal state. Only a factory reset clears them.

use crate::traits::{Storage, StorageError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Storage key for the retracted counter
pub const KEY_RETRACTED_COUNT: &str = "retracted";

/// Storage key for the extended counter
pub const KEY_EXTENDED_COUNT: &str = "extended";

/// Counter identifier, named after its storage key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveCounter {
    Retracted,
    Extended,
}

impl MoveCounter {
    /// Storage key for this counter
    pub fn key(&self) -> &'static str {
        match self {
            MoveCounter::Retracted => KEY_RETRACTED_COUNT,
            MoveCounter::Extended => KEY_EXTENDED_COUNT,
        }
    }

    /// Read-modify-write increment in storage
    ///
    /// Returns the new persisted value.
    pub fn increment_in<S: Storage>(&self, store: &mut S) -> Result<i32, StorageError> {
        let value = match store.get_int(self.key()) {
            Ok(v) => v,
            Err(StorageError::NotFound) => 0,
            Err(e) => return Err(e),
        };
        let next = value.saturating_add(1);
        store.set_int(self.key(), next)?;
        Ok(next)
    }
}

/// In-memory mirror of both counters for the status surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveCounters {
    pub retracted: u32,
    pub extended: u32,
}

impl MoveCounters {
    /// Load both counters, initializing missing keys to zero
    pub fn load<S: Storage>(store: &mut S) -> Self {
        let mut read = |counter: MoveCounter| {
            store
                .get_int_or_init(counter.key(), 0)
                .map(|v| v.max(0) as u32)
                .unwrap_or(0)
        };
        Self {
            retracted: read(MoveCounter::Retracted),
            extended: read(MoveCounter::Extended),
        }
    }

    /// Factory reset: zero both counters in storage and in the mirror
    pub fn reset<S: Storage>(&mut self, store: &mut S) -> Result<(), StorageError> {
        store.set_int(KEY_RETRACTED_COUNT, 0)?;
        store.set_int(KEY_EXTENDED_COUNT, 0)?;
        *self = Self::default();
        Ok(())
    }

    /// Increment the mirror value of a counter
    pub fn bump(&mut self, counter: MoveCounter) {
        match counter {
            MoveCounter::Retracted => self.retracted = self.retracted.saturating_add(1),
            MoveCounter::Extended => self.extended = self.extended.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockStore;

    #[test]
    fn test_load_initializes_missing() {
        let mut store = MockStore::default();
        store.ints.insert(KEY_EXTENDED_COUNT.into(), 42);

        let counters = MoveCounters::load(&mut store);
        assert_eq!(counters.extended, 42);
        assert_eq!(counters.retracted, 0);
        assert_eq!(store.ints[KEY_RETRACTED_COUNT], 0);
    }

    #[test]
    fn test_load_repairs_wrong_type() {
        let mut store = MockStore::default();
        store.floats.insert(KEY_RETRACTED_COUNT.into(), 1.5);

        let counters = MoveCounters::load(&mut store);
        assert_eq!(counters.retracted, 0);
        assert_eq!(store.ints[KEY_RETRACTED_COUNT], 0);
    }

    #[test]
    fn test_increment_in_storage() {
        let mut store = MockStore::default();
        assert_eq!(MoveCounter::Retracted.increment_in(&mut store), Ok(1));
        assert_eq!(MoveCounter::Retracted.increment_in(&mut store), Ok(2));
        assert!(!store.ints.contains_key(KEY_EXTENDED_COUNT));
    }

    #[test]
    fn test_reset() {
        let mut store = MockStore::default();
        store.ints.insert(KEY_RETRACTED_COUNT.into(), 7);
        store.ints.insert(KEY_EXTENDED_COUNT.into(), 9);
        let mut counters = MoveCounters::load(&mut store);

        counters.reset(&mut store).unwrap();
        assert_eq!(counters, MoveCounters::default());
        assert_eq!(store.ints[KEY_RETRACTED_COUNT], 0);
        assert_eq!(store.ints[KEY_EXTENDED_COUNT], 0);
    }

    #[test]
    fn test_mirror_bump() {
        let mut counters = MoveCounters::default();
        counters.bump(MoveCounter::Extended);
        assert_eq!(counters.extended, 1);
        assert_eq!(counters.retracted, 0);
    }
}
