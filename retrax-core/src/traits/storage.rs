//! Persistent key/value storage trait
//!
//! The storage collaborator owns persistence; the core only reads and
//! writes plain scalar values under string keys.

use heapless::String;

/// Maximum key length in bytes
pub const MAX_KEY_LEN: usize = 24;

/// Maximum string value length in bytes
pub const MAX_TEXT_LEN: usize = 32;

/// String value type
pub type Text = String<MAX_TEXT_LEN>;

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Key not present
    NotFound,
    /// Key present with a value of another type
    TypeMismatch,
    /// No room for another key, or key/value too long
    Full,
    /// Backend (flash, filesystem) failure
    Backend,
}

/// Scalar key/value store
pub trait Storage {
    /// Read an integer value
    fn get_int(&mut self, key: &str) -> Result<i32, StorageError>;

    /// Write an integer value
    fn set_int(&mut self, key: &str, value: i32) -> Result<(), StorageError>;

    /// Read a float value
    fn get_float(&mut self, key: &str) -> Result<f32, StorageError>;

    /// Write a float value
    fn set_float(&mut self, key: &str, value: f32) -> Result<(), StorageError>;

    /// Read a string value
    fn get_string(&mut self, key: &str) -> Result<Text, StorageError>;

    /// Write a string value
    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read an integer, substituting and writing back `default` when the
    /// key is missing or holds another type
    fn get_int_or_init(&mut self, key: &str, default: i32) -> Result<i32, StorageError> {
        match self.get_int(key) {
            Ok(value) => Ok(value),
            Err(StorageError::NotFound | StorageError::TypeMismatch) => {
                self.set_int(key, default)?;
                Ok(default)
            }
            Err(e) => Err(e),
        }
    }
}
