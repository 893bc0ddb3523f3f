//! Shared RAM store
//!
//! One store instance shared between the controller (through the
//! `Storage` trait) and the storage writer task.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;

use retrax_core::traits::{Storage, StorageError, Text};
use retrax_drivers::storage::{RamStore, Value};
use retrax_hal::StorageKey;

use super::persistence::storage_key;

/// Key capacity of the RAM store (power of two)
pub const STORE_CAPACITY: usize = 8;

pub type Store = RamStore<STORE_CAPACITY>;

static STORE: Mutex<CriticalSectionRawMutex, RefCell<Store>> =
    Mutex::new(RefCell::new(RamStore::new()));

/// Entries that map to a flash record
pub type PersistedEntries = Vec<(StorageKey, Value), STORE_CAPACITY>;

/// Handle to the shared store
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedStore;

impl SharedStore {
    /// Replace the store contents, e.g. with values loaded from flash
    pub fn install(store: Store) {
        STORE.lock(|s| *s.borrow_mut() = store);
    }

    /// Check and clear the unsaved-changes flag
    pub fn take_dirty(&self) -> bool {
        STORE.lock(|s| s.borrow_mut().take_dirty())
    }

    /// Copy out every entry that has a flash record
    pub fn persisted_entries(&self) -> PersistedEntries {
        STORE.lock(|s| {
            let store = s.borrow();
            let mut entries = PersistedEntries::new();
            for (name, value) in store.iter() {
                if let Some(key) = storage_key(name) {
                    let _ = entries.push((key, value.clone()));
                }
            }
            entries
        })
    }

    fn with<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        STORE.lock(|s| f(&mut s.borrow_mut()))
    }
}

impl Storage for SharedStore {
    fn get_int(&mut self, key: &str) -> Result<i32, StorageError> {
        self.with(|s| s.get_int(key))
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<(), StorageError> {
        self.with(|s| s.set_int(key, value))
    }

    fn get_float(&mut self, key: &str) -> Result<f32, StorageError> {
        self.with(|s| s.get_float(key))
    }

    fn set_float(&mut self, key: &str, value: f32) -> Result<(), StorageError> {
        self.with(|s| s.set_float(key, value))
    }

    fn get_string(&mut self, key: &str) -> Result<Text, StorageError> {
        self.with(|s| s.get_string(key))
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with(|s| s.set_string(key, value))
    }
}
