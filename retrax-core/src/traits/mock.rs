//! In-memory storage for unit tests

use std::collections::HashMap;

use super::{Storage, StorageError, Text};

/// Integer/float key/value store with a switchable backend failure
#[derive(Debug, Default)]
pub struct MockStore {
    pub ints: HashMap<String, i32>,
    pub floats: HashMap<String, f32>,
    /// Every call fails with `StorageError::Backend`
    pub broken: bool,
}

impl MockStore {
    fn check(&self) -> Result<(), StorageError> {
        if self.broken {
            Err(StorageError::Backend)
        } else {
            Ok(())
        }
    }
}

impl Storage for MockStore {
    fn get_int(&mut self, key: &str) -> Result<i32, StorageError> {
        self.check()?;
        if self.floats.contains_key(key) {
            return Err(StorageError::TypeMismatch);
        }
        self.ints.get(key).copied().ok_or(StorageError::NotFound)
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<(), StorageError> {
        self.check()?;
        self.floats.remove(key);
        self.ints.insert(key.into(), value);
        Ok(())
    }

    fn get_float(&mut self, key: &str) -> Result<f32, StorageError> {
        self.check()?;
        self.floats.get(key).copied().ok_or(StorageError::NotFound)
    }

    fn set_float(&mut self, key: &str, value: f32) -> Result<(), StorageError> {
        self.check()?;
        self.ints.remove(key);
        self.floats.insert(key.into(), value);
        Ok(())
    }

    fn get_string(&mut self, _key: &str) -> Result<Text, StorageError> {
        self.check()?;
        Err(StorageError::NotFound)
    }

    fn set_string(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.check()
    }
}
