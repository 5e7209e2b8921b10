//! Process-local slots. Clones share the same underlying map, so a test can
//! hand one handle to a store and keep another to inspect what was written.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::SlotStorage;
use crate::types::errors::StorageError;

#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
    quarantine: Arc<Mutex<Vec<(String, String)>>>,
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys passed to `set`, in call order.
    pub fn write_log(&self) -> Vec<String> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// `(key, value)` pairs passed to `quarantine`, in call order.
    pub fn quarantined(&self) -> Vec<(String, String)> {
        self.quarantine.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Io("memory slot lock poisoned".to_string())
}

impl SlotStorage for MemorySlotStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().map_err(poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .lock()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        self.writes.lock().map_err(poisoned)?.push(key.to_string());
        Ok(())
    }

    fn quarantine(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.quarantine
            .lock()
            .map_err(poisoned)?
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}
