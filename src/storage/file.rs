//! Directory-backed slots: each key is stored as `<key>.json`.
//!
//! Writes go to a temporary sibling first and are renamed into place, so a
//! crash mid-write leaves the previous value readable.

use std::fs;
use std::path::{Path, PathBuf};

use super::SlotStorage;
use crate::services::clock::{Clock, SystemClock};
use crate::types::errors::StorageError;

pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    /// Uses `dir` for slot files, creating it if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Maps a key onto a safe file name component.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

impl SlotStorage for FileSlotStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!("{}: {}", path.display(), e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| StorageError::Io(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| StorageError::Io(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    fn quarantine(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self
            .dir
            .join(format!("{}.corrupt-{}.json", file_stem(key), SystemClock.now_millis()));
        fs::write(&path, value)
            .map_err(|e| StorageError::Io(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}
