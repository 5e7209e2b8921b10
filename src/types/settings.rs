use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for the bookmark store host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StoreSettings {
    pub storage: StorageSettings,
    pub recovery: RecoverySettings,
    pub logging: LoggingSettings,
}

/// Which slot backend holds the persisted collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    File,
    Memory,
}

/// Where and how bookmark slots are stored.
///
/// Relative paths are resolved against the platform data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub database_file: String,
    pub slot_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            database_file: "bookmarks.db".to_string(),
            slot_dir: "slots".to_string(),
        }
    }
}

impl StorageSettings {
    /// The SQLite file, resolved against `data_dir` when relative.
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        resolve(data_dir, &self.database_file)
    }

    /// The slot file directory, resolved against `data_dir` when relative.
    pub fn slot_dir_path(&self, data_dir: &Path) -> PathBuf {
        resolve(data_dir, &self.slot_dir)
    }
}

fn resolve(base: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

/// What to do when a persisted slot fails to parse at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorruptSlotPolicy {
    /// Abort store initialization.
    Fail,
    /// Copy the unreadable text aside and start with an empty collection.
    #[default]
    Quarantine,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RecoverySettings {
    pub corrupt_slot_policy: CorruptSlotPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"info"` or `"quran_bookmarks=debug"`.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
