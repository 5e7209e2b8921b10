//! Durable key-value slots.
//!
//! A slot holds one text value under a string key and survives process
//! restarts. The bookmark store keeps each collection in its own slot and
//! overwrites it whole on every mutation.

pub mod file;
pub mod memory;
pub mod sqlite;

pub use file::FileSlotStorage;
pub use memory::MemorySlotStorage;
pub use sqlite::SqliteSlotStorage;

use crate::types::errors::StorageError;

/// Key-value slot abstraction consumed by the bookmark store.
pub trait SlotStorage {
    /// Returns the text stored under `key`, or `None` if the slot is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the text stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Keeps a copy of an unreadable `value` that was found under `key`.
    ///
    /// Must not modify the slot itself; resetting it is up to the caller.
    fn quarantine(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
