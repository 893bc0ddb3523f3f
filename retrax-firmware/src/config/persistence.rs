//! Settings persistence
//!
//! Each persisted key is one flash record: the one-byte `StorageKey`
//! and a postcard-encoded scalar. Loading fills the RAM store; saving
//! writes back entries that changed since the last save.

use defmt::*;
use serde::{Deserialize, Serialize};

use retrax_core::config::{
    KEY_DELAY_TO_MIDDLE, KEY_EXTENDED_COUNT, KEY_MOVE_TIMEOUT, KEY_RETRACTED_COUNT,
};
use retrax_drivers::storage::Value;
use retrax_hal::{FlashError, FlashStorage, StorageKey};

use super::store::{PersistedEntries, Store};

/// Maximum encoded record size
const MAX_RECORD_SIZE: usize = 16;

/// Settings persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Flash operation failed
    Flash(FlashError),
    /// Encoding failed
    Serialize,
    /// Decoding failed
    Deserialize,
    /// Value type has no flash representation
    Unsupported,
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

/// On-flash value encoding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum StoredValue {
    Int(i32),
    Float(f32),
}

impl StoredValue {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(StoredValue::Int(*v)),
            Value::Float(v) => Some(StoredValue::Float(*v)),
            Value::Text(_) => None,
        }
    }

    fn into_value(self) -> Value {
        match self {
            StoredValue::Int(v) => Value::Int(v),
            StoredValue::Float(v) => Value::Float(v),
        }
    }
}

/// Store key name for a flash record
pub fn key_name(key: StorageKey) -> &'static str {
    match key {
        StorageKey::MoveTimeout => KEY_MOVE_TIMEOUT,
        StorageKey::DelayToMiddle => KEY_DELAY_TO_MIDDLE,
        StorageKey::RetractedCount => KEY_RETRACTED_COUNT,
        StorageKey::ExtendedCount => KEY_EXTENDED_COUNT,
    }
}

/// Flash record for a store key name
pub fn storage_key(name: &str) -> Option<StorageKey> {
    StorageKey::ALL.into_iter().find(|k| key_name(*k) == name)
}

/// Settings persistence manager
pub struct SettingsPersistence<F> {
    storage: F,
    /// Values as last read from or written to flash
    saved: PersistedEntries,
}

impl<F: FlashStorage> SettingsPersistence<F> {
    /// Create a new persistence manager
    pub fn new(storage: F) -> Self {
        Self {
            storage,
            saved: PersistedEntries::new(),
        }
    }

    /// Load every known key from flash into `store`
    ///
    /// Missing or undecodable records are skipped; the controller
    /// substitutes defaults for them. A corrupted map is erased and
    /// nothing is loaded, so the defaults get written back on the first
    /// save. Returns the number of keys loaded.
    pub async fn load(&mut self, store: &mut Store) -> usize {
        info!("Loading settings from flash...");

        let mut loaded = 0;
        for key in StorageKey::ALL {
            match self.read(key).await {
                Ok(value) => {
                    debug!("  {} = {:?}", key_name(key), value);
                    if store.preload(key_name(key), value.clone()).is_ok() {
                        self.remember(key, value);
                        loaded += 1;
                    }
                }
                Err(ConfigError::Flash(FlashError::NotFound)) => {
                    debug!("  {} not stored", key_name(key));
                }
                Err(ConfigError::Flash(FlashError::Corrupted)) => {
                    error!("Settings flash corrupted, erasing");
                    if let Err(e) = self.erase().await {
                        error!("Settings erase failed: {:?}", e);
                    }
                    *store = Store::new();
                    return 0;
                }
                Err(e) => {
                    warn!("Failed to load {}: {:?}", key_name(key), e);
                }
            }
        }

        info!("Loaded {} settings from flash", loaded);
        loaded
    }

    /// Write entries that differ from what flash holds
    ///
    /// Returns the number of records written. Stops at the first error.
    pub async fn save(&mut self, entries: &PersistedEntries) -> Result<usize, ConfigError> {
        let mut written = 0;
        for (key, value) in entries.iter() {
            if self.saved.iter().any(|(k, v)| k == key && v == value) {
                continue;
            }
            self.write(*key, value).await?;
            self.remember(*key, value.clone());
            written += 1;
        }
        Ok(written)
    }

    /// Erase every stored record
    async fn erase(&mut self) -> Result<(), ConfigError> {
        self.storage.erase_all().await?;
        self.saved.clear();
        Ok(())
    }

    async fn read(&mut self, key: StorageKey) -> Result<Value, ConfigError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = self.storage.read(key, &mut buffer).await?;
        let stored: StoredValue =
            postcard::from_bytes(&buffer[..len]).map_err(|_| ConfigError::Deserialize)?;
        Ok(stored.into_value())
    }

    async fn write(&mut self, key: StorageKey, value: &Value) -> Result<(), ConfigError> {
        let stored = StoredValue::from_value(value).ok_or(ConfigError::Unsupported)?;
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let bytes =
            postcard::to_slice(&stored, &mut buffer).map_err(|_| ConfigError::Serialize)?;
        self.storage.write(key, bytes).await?;
        Ok(())
    }

    fn remember(&mut self, key: StorageKey, value: Value) {
        if let Some(slot) = self.saved.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            let _ = self.saved.push((key, value));
        }
    }
}
