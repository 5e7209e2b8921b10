//! App core.
//!
//! Owns the [`SettingsEngine`] and the single [`BookmarkStore`] built from
//! its settings. Hosts hold one `App` and hand `&mut app.store` to whatever
//! renders bookmarks.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::managers::bookmark_store::BookmarkStore;
use crate::services::clock::{Clock, SystemClock};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::storage::{FileSlotStorage, MemorySlotStorage, SlotStorage, SqliteSlotStorage};
use crate::types::settings::{StorageBackend, StoreSettings};

type SharedClock = Arc<dyn Clock + Send + Sync>;

pub struct App {
    pub settings_engine: SettingsEngine,
    pub data_dir: PathBuf,
    pub store: BookmarkStore,
    clock: SharedClock,
}

impl App {
    /// Opens the store described by the engine's current settings, resolving
    /// relative paths against `data_dir`.
    pub fn open(settings_engine: SettingsEngine, data_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_clock(settings_engine, data_dir, Arc::new(SystemClock))
    }

    pub fn with_clock(
        settings_engine: SettingsEngine,
        data_dir: &Path,
        clock: SharedClock,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let store = open_store(settings_engine.get_settings(), data_dir, &clock)?;
        Ok(Self {
            settings_engine,
            data_dir: data_dir.to_path_buf(),
            store,
            clock,
        })
    }

    /// Changes one `section.field` setting and saves it.
    ///
    /// Storage and recovery changes reopen the store, dropping any listeners
    /// registered on the previous one. Logging changes apply on next start.
    pub fn update_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
        self.settings_engine.set_value(key, value)?;
        if key.starts_with("storage.") || key.starts_with("recovery.") {
            self.reopen_store()?;
        }
        Ok(())
    }

    /// Restores default settings, saves them and reopens the store.
    pub fn reset_settings(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.settings_engine.reset()?;
        self.reopen_store()
    }

    fn reopen_store(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.store = open_store(self.settings_engine.get_settings(), &self.data_dir, &self.clock)?;
        Ok(())
    }
}

fn open_store(
    settings: &StoreSettings,
    data_dir: &Path,
    clock: &SharedClock,
) -> Result<BookmarkStore, Box<dyn std::error::Error>> {
    let storage = open_storage(settings, data_dir)?;
    let store = BookmarkStore::open(storage, Box::new(Arc::clone(clock)), settings.recovery.corrupt_slot_policy)
        .map_err(|e| format!("BookmarkStore init failed: {}", e))?;

    info!(backend = ?settings.storage.backend, data_dir = %data_dir.display(), "bookmark store ready");
    Ok(store)
}

fn open_storage(
    settings: &StoreSettings,
    data_dir: &Path,
) -> Result<Box<dyn SlotStorage + Send>, Box<dyn std::error::Error>> {
    let storage: Box<dyn SlotStorage + Send> = match settings.storage.backend {
        StorageBackend::Sqlite => {
            let path = settings.storage.database_path(data_dir);
            Box::new(SqliteSlotStorage::open(path)?)
        }
        StorageBackend::File => {
            let dir = settings.storage.slot_dir_path(data_dir);
            Box::new(FileSlotStorage::open(dir)?)
        }
        StorageBackend::Memory => Box::new(MemorySlotStorage::new()),
    };
    Ok(storage)
}
