//! Flash storage abstractions
//!
//! Provides traits for persistent key-value storage that can be implemented
//! by chip-specific HALs using their flash memory.

use core::future::Future;

/// Storage keys for persisted values
///
/// One flash record per key. The discriminant is the on-flash key byte
/// and must never be reused for another value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Lift move timeout (seconds)
    MoveTimeout = 0,
    /// Delay before retracting (seconds)
    DelayToMiddle = 1,
    /// Move counter stored under the `retracted` name
    RetractedCount = 2,
    /// Move counter stored under the `extended` name
    ExtendedCount = 3,
}

impl StorageKey {
    /// All keys, in key byte order
    pub const ALL: [StorageKey; 4] = [
        StorageKey::MoveTimeout,
        StorageKey::DelayToMiddle,
        StorageKey::RetractedCount,
        StorageKey::ExtendedCount,
    ];

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_u8() == value)
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Storage operation failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Flash storage trait
///
/// Provides wear-leveled key-value storage. Implementations handle
/// wear leveling and data integrity.
pub trait FlashStorage {
    /// Read a value by key into the provided buffer
    ///
    /// # Returns
    /// The number of bytes read, or an error.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl Future<Output = Result<usize, FlashError>>;

    /// Write a value by key
    fn write(&mut self, key: StorageKey, data: &[u8]) -> impl Future<Output = Result<(), FlashError>>;

    /// Erase all stored data
    fn erase_all(&mut self) -> impl Future<Output = Result<(), FlashError>>;
}

#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bytes_roundtrip() {
        for key in StorageKey::ALL {
            assert_eq!(StorageKey::from_u8(key.as_u8()), Some(key));
        }
        assert_eq!(StorageKey::from_u8(0xFF), None);
    }

    #[test]
    fn test_key_bytes_are_stable() {
        assert_eq!(StorageKey::MoveTimeout.as_u8(), 0);
        assert_eq!(StorageKey::ExtendedCount.as_u8(), 3);
    }
}
