//! RAM-backed key/value store
//!
//! Holds the working copy of all persisted values. The firmware loads it
//! from flash at boot and writes changed entries back in the background;
//! the controller only ever sees this store.

use heapless::{FnvIndexMap, String};
use retrax_core::traits::{Storage, StorageError, Text, MAX_KEY_LEN};

/// Stored value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Int(i32),
    Float(f32),
    Text(Text),
}

type Key = String<MAX_KEY_LEN>;

/// Fixed-capacity key/value store
///
/// `N` must be a power of two.
pub struct RamStore<const N: usize> {
    entries: FnvIndexMap<Key, Value, N>,
    /// Set on every successful write
    dirty: bool,
}

impl<const N: usize> Default for RamStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RamStore<N> {
    pub const fn new() -> Self {
        Self {
            entries: FnvIndexMap::new(),
            dirty: false,
        }
    }

    /// Look up a raw value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&Self::key(key).ok()?)
    }

    /// Insert a raw value without marking the store dirty
    ///
    /// Used when loading from a persistent backend.
    pub fn preload(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.insert(key, value)
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check and clear the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    fn key(key: &str) -> Result<Key, StorageError> {
        Key::try_from(key).map_err(|_| StorageError::Full)
    }

    fn insert(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        let key = Self::key(key)?;
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return Ok(());
        }
        self.entries
            .insert(key, value)
            .map_err(|_| StorageError::Full)?;
        Ok(())
    }

    fn write(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        if self.get(key) == Some(&value) {
            return Ok(());
        }
        self.insert(key, value)?;
        self.dirty = true;
        Ok(())
    }
}

impl<const N: usize> Storage for RamStore<N> {
    fn get_int(&mut self, key: &str) -> Result<i32, StorageError> {
        match self.get(key) {
            Some(Value::Int(v)) => Ok(*v),
            Some(_) => Err(StorageError::TypeMismatch),
            None => Err(StorageError::NotFound),
        }
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<(), StorageError> {
        self.write(key, Value::Int(value))
    }

    fn get_float(&mut self, key: &str) -> Result<f32, StorageError> {
        match self.get(key) {
            Some(Value::Float(v)) => Ok(*v),
            Some(_) => Err(StorageError::TypeMismatch),
            None => Err(StorageError::NotFound),
        }
    }

    fn set_float(&mut self, key: &str, value: f32) -> Result<(), StorageError> {
        self.write(key, Value::Float(value))
    }

    fn get_string(&mut self, key: &str) -> Result<Text, StorageError> {
        match self.get(key) {
            Some(Value::Text(v)) => Ok(v.clone()),
            Some(_) => Err(StorageError::TypeMismatch),
            None => Err(StorageError::NotFound),
        }
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let text = Text::try_from(value).map_err(|_| StorageError::Full)?;
        self.write(key, Value::Text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_roundtrip_and_dirty() {
        let mut store = RamStore::<8>::new();
        assert_eq!(store.get_int("retracted"), Err(StorageError::NotFound));

        store.set_int("retracted", 3).unwrap();
        assert_eq!(store.get_int("retracted"), Ok(3));
        assert!(store.take_dirty());
        assert!(!store.take_dirty());

        // Unchanged value does not dirty the store
        store.set_int("retracted", 3).unwrap();
        assert!(!store.take_dirty());
    }

    #[test]
    fn test_type_mismatch() {
        let mut store = RamStore::<8>::new();
        store.set_float("ratio", 0.5).unwrap();
        assert_eq!(store.get_int("ratio"), Err(StorageError::TypeMismatch));
        assert_eq!(store.get_float("ratio"), Ok(0.5));
    }

    #[test]
    fn test_preload_is_clean() {
        let mut store = RamStore::<8>::new();
        store.preload("extended", Value::Int(12)).unwrap();
        assert!(!store.take_dirty());
        assert_eq!(store.get_int("extended"), Ok(12));
    }

    #[test]
    fn test_capacity() {
        let mut store = RamStore::<2>::new();
        store.set_int("a", 1).unwrap();
        store.set_int("b", 2).unwrap();
        assert_eq!(store.set_int("c", 3), Err(StorageError::Full));
        // Overwriting an existing key still works when full
        store.set_int("a", 4).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_long_key_rejected() {
        let mut store = RamStore::<4>::new();
        let key = "a_key_that_is_much_longer_than_allowed";
        assert_eq!(store.set_int(key, 1), Err(StorageError::Full));
        assert_eq!(store.get_int(key), Err(StorageError::NotFound));
    }

    #[test]
    fn test_string_values() {
        let mut store = RamStore::<4>::new();
        store.set_string("name", "lift").unwrap();
        assert_eq!(store.get_string("name").unwrap().as_str(), "lift");
    }

    #[test]
    fn test_get_int_or_init() {
        let mut store = RamStore::<4>::new();
        assert_eq!(store.get_int_or_init("delay_to_middle", 5), Ok(5));
        assert_eq!(store.get_int("delay_to_middle"), Ok(5));
    }
}
