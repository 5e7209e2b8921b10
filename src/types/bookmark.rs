use serde::{Deserialize, Serialize};

/// A bookmarked surah. Identity is `surah_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurahBookmark {
    pub surah_number: i64,
    pub surah_name: String,
    /// Epoch milliseconds, stamped by the store on insertion.
    pub timestamp: i64,
}

/// A bookmarked ayah. Identity is the `(surah_number, ayah_number)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AyahBookmark {
    pub surah_number: i64,
    pub surah_name: String,
    pub ayah_number: i64,
    pub ayah_text: String,
    /// Epoch milliseconds, stamped by the store on insertion.
    pub timestamp: i64,
}

impl AyahBookmark {
    pub fn key(&self) -> AyahKey {
        AyahKey {
            surah_number: self.surah_number,
            ayah_number: self.ayah_number,
        }
    }
}

/// Identity of an ayah bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AyahKey {
    pub surah_number: i64,
    pub ayah_number: i64,
}

/// Notification raised by the store after a mutation has been written through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkChange {
    SurahAdded(SurahBookmark),
    SurahRemoved { surah_number: i64 },
    AyahAdded(AyahBookmark),
    AyahRemoved(AyahKey),
}
