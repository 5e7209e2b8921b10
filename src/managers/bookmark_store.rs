//! Bookmark store.
//!
//! Holds the surah and ayah bookmark collections in memory and writes each
//! collection through to its own durable slot after every mutation. Storage
//! is read exactly once, when the store is opened; all queries are answered
//! from memory.

use std::collections::HashSet;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::services::clock::Clock;
use crate::storage::SlotStorage;
use crate::types::bookmark::{AyahBookmark, AyahKey, BookmarkChange, SurahBookmark};
use crate::types::errors::BookmarkError;
use crate::types::settings::CorruptSlotPolicy;

/// Slot holding the JSON array of surah bookmarks.
pub const SURAH_BOOKMARKS_KEY: &str = "quran-app-surah-bookmarks";
/// Slot holding the JSON array of ayah bookmarks.
pub const AYAH_BOOKMARKS_KEY: &str = "quran-app-ayah-bookmarks";

/// Trait defining bookmark store operations.
///
/// Adding an existing key and removing an absent one are silent no-ops.
/// Mutations only fail when the write-through to storage fails; the
/// in-memory change is kept in that case.
pub trait BookmarkStoreTrait {
    fn add_surah_bookmark(&mut self, surah_number: i64, surah_name: &str) -> Result<(), BookmarkError>;
    fn remove_surah_bookmark(&mut self, surah_number: i64) -> Result<(), BookmarkError>;
    fn is_surah_bookmarked(&self, surah_number: i64) -> bool;
    /// Copy of all surah bookmarks, ascending by surah number.
    fn get_all_surah_bookmarks(&self) -> Vec<SurahBookmark>;

    fn add_ayah_bookmark(
        &mut self,
        surah_number: i64,
        surah_name: &str,
        ayah_number: i64,
        ayah_text: &str,
    ) -> Result<(), BookmarkError>;
    fn remove_ayah_bookmark(&mut self, surah_number: i64, ayah_number: i64) -> Result<(), BookmarkError>;
    fn is_ayah_bookmarked(&self, surah_number: i64, ayah_number: i64) -> bool;
    /// Copy of all ayah bookmarks, ascending by surah number then ayah number.
    fn get_all_ayah_bookmarks(&self) -> Vec<AyahBookmark>;
}

/// Handle returned by [`BookmarkStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&BookmarkChange) + Send>;

/// In-memory bookmark collections with write-through persistence.
pub struct BookmarkStore {
    storage: Box<dyn SlotStorage + Send>,
    clock: Box<dyn Clock + Send>,
    surahs: Vec<SurahBookmark>,
    ayahs: Vec<AyahBookmark>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl BookmarkStore {
    /// Hydrates both collections from `storage`.
    ///
    /// An absent or empty slot yields an empty collection. A slot that does
    /// not parse is handled according to `policy`; under
    /// [`CorruptSlotPolicy::Quarantine`] its text is copied aside and the slot
    /// is reset to `[]`.
    pub fn open(
        storage: Box<dyn SlotStorage + Send>,
        clock: Box<dyn Clock + Send>,
        policy: CorruptSlotPolicy,
    ) -> Result<Self, BookmarkError> {
        let surahs: Vec<SurahBookmark> =
            hydrate(storage.as_ref(), SURAH_BOOKMARKS_KEY, policy)?;
        let ayahs: Vec<AyahBookmark> = hydrate(storage.as_ref(), AYAH_BOOKMARKS_KEY, policy)?;

        let surahs = dedup_by_key(surahs, |b| b.surah_number);
        let ayahs = dedup_by_key(ayahs, AyahBookmark::key);

        info!(
            surahs = surahs.len(),
            ayahs = ayahs.len(),
            "bookmark store hydrated"
        );

        Ok(Self {
            storage,
            clock,
            surahs,
            ayahs,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Registers a listener called after every effective mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&BookmarkChange) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn surah_count(&self) -> usize {
        self.surahs.len()
    }

    pub fn ayah_count(&self) -> usize {
        self.ayahs.len()
    }

    /// Ayah bookmarks within one surah, ascending by ayah number.
    pub fn ayah_bookmarks_for_surah(&self, surah_number: i64) -> Vec<AyahBookmark> {
        let mut result: Vec<AyahBookmark> = self
            .ayahs
            .iter()
            .filter(|b| b.surah_number == surah_number)
            .cloned()
            .collect();
        result.sort_by_key(|b| b.ayah_number);
        result
    }

    /// Adds the bookmark if absent, removes it otherwise. Returns the new state.
    pub fn toggle_surah_bookmark(&mut self, surah_number: i64, surah_name: &str) -> Result<bool, BookmarkError> {
        if self.is_surah_bookmarked(surah_number) {
            self.remove_surah_bookmark(surah_number)?;
            Ok(false)
        } else {
            self.add_surah_bookmark(surah_number, surah_name)?;
            Ok(true)
        }
    }

    /// Adds the bookmark if absent, removes it otherwise. Returns the new state.
    pub fn toggle_ayah_bookmark(
        &mut self,
        surah_number: i64,
        surah_name: &str,
        ayah_number: i64,
        ayah_text: &str,
    ) -> Result<bool, BookmarkError> {
        if self.is_ayah_bookmarked(surah_number, ayah_number) {
            self.remove_ayah_bookmark(surah_number, ayah_number)?;
            Ok(false)
        } else {
            self.add_ayah_bookmark(surah_number, surah_name, ayah_number, ayah_text)?;
            Ok(true)
        }
    }

    fn persist_surahs(&self) -> Result<(), BookmarkError> {
        persist(self.storage.as_ref(), SURAH_BOOKMARKS_KEY, &self.surahs)
    }

    fn persist_ayahs(&self) -> Result<(), BookmarkError> {
        persist(self.storage.as_ref(), AYAH_BOOKMARKS_KEY, &self.ayahs)
    }

    /// Notifies listeners of an applied change and hands back the write-through result.
    /// Listeners run even if the write failed; the in-memory change stands.
    fn commit(&self, written: Result<(), BookmarkError>, change: BookmarkChange) -> Result<(), BookmarkError> {
        for (_, listener) in &self.listeners {
            listener(&change);
        }
        written
    }
}

impl BookmarkStoreTrait for BookmarkStore {
    fn add_surah_bookmark(&mut self, surah_number: i64, surah_name: &str) -> Result<(), BookmarkError> {
        if self.is_surah_bookmarked(surah_number) {
            return Ok(());
        }

        let bookmark = SurahBookmark {
            surah_number,
            surah_name: surah_name.to_string(),
            timestamp: self.clock.now_millis(),
        };
        self.surahs.push(bookmark.clone());

        let written = self.persist_surahs();
        self.commit(written, BookmarkChange::SurahAdded(bookmark))
    }

    fn remove_surah_bookmark(&mut self, surah_number: i64) -> Result<(), BookmarkError> {
        let before = self.surahs.len();
        self.surahs.retain(|b| b.surah_number != surah_number);
        if self.surahs.len() == before {
            return Ok(());
        }

        let written = self.persist_surahs();
        self.commit(written, BookmarkChange::SurahRemoved { surah_number })
    }

    fn is_surah_bookmarked(&self, surah_number: i64) -> bool {
        self.surahs.iter().any(|b| b.surah_number == surah_number)
    }

    fn get_all_surah_bookmarks(&self) -> Vec<SurahBookmark> {
        let mut all = self.surahs.clone();
        all.sort_by_key(|b| b.surah_number);
        all
    }

    fn add_ayah_bookmark(
        &mut self,
        surah_number: i64,
        surah_name: &str,
        ayah_number: i64,
        ayah_text: &str,
    ) -> Result<(), BookmarkError> {
        if self.is_ayah_bookmarked(surah_number, ayah_number) {
            return Ok(());
        }

        let bookmark = AyahBookmark {
            surah_number,
            surah_name: surah_name.to_string(),
            ayah_number,
            ayah_text: ayah_text.to_string(),
            timestamp: self.clock.now_millis(),
        };
        self.ayahs.push(bookmark.clone());

        let written = self.persist_ayahs();
        self.commit(written, BookmarkChange::AyahAdded(bookmark))
    }

    fn remove_ayah_bookmark(&mut self, surah_number: i64, ayah_number: i64) -> Result<(), BookmarkError> {
        let key = AyahKey {
            surah_number,
            ayah_number,
        };
        let before = self.ayahs.len();
        self.ayahs.retain(|b| b.key() != key);
        if self.ayahs.len() == before {
            return Ok(());
        }

        let written = self.persist_ayahs();
        self.commit(written, BookmarkChange::AyahRemoved(key))
    }

    fn is_ayah_bookmarked(&self, surah_number: i64, ayah_number: i64) -> bool {
        self.ayahs
            .iter()
            .any(|b| b.surah_number == surah_number && b.ayah_number == ayah_number)
    }

    fn get_all_ayah_bookmarks(&self) -> Vec<AyahBookmark> {
        let mut all = self.ayahs.clone();
        all.sort_by_key(AyahBookmark::key);
        all
    }
}

/// Reads and parses one slot.
fn hydrate<T: DeserializeOwned>(
    storage: &(dyn SlotStorage + Send),
    key: &str,
    policy: CorruptSlotPolicy,
) -> Result<Vec<T>, BookmarkError> {
    let text = match storage.get(key)? {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(Vec::new()),
    };

    match serde_json::from_str::<Vec<T>>(&text) {
        Ok(items) => Ok(items),
        Err(e) => match policy {
            CorruptSlotPolicy::Fail => Err(BookmarkError::CorruptSlot {
                key: key.to_string(),
                reason: e.to_string(),
            }),
            CorruptSlotPolicy::Quarantine => {
                // Reset only after the bad text is copied aside.
                storage.quarantine(key, &text)?;
                storage.set(key, "[]")?;
                warn!(key, error = %e, "unreadable bookmark slot quarantined, starting empty");
                Ok(Vec::new())
            }
        },
    }
}

/// Serializes the whole collection and overwrites its slot.
fn persist<T: Serialize>(
    storage: &(dyn SlotStorage + Send),
    key: &str,
    items: &[T],
) -> Result<(), BookmarkError> {
    let text = serde_json::to_string(items).map_err(|e| BookmarkError::Serialization(e.to_string()))?;
    storage.set(key, &text).map_err(|e| {
        warn!(key, error = %e, "bookmark slot write failed");
        BookmarkError::from(e)
    })?;
    debug!(key, entries = items.len(), "bookmark slot written");
    Ok(())
}

/// Keeps the first entry for each key, preserving order.
fn dedup_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}
