//! RPC method handler for the bookmark JSON-RPC bridge.
//!
//! Kept separate from `rpc_server.rs` so it can be unit-tested. The
//! `handle_method` function dispatches each call to the process-wide
//! [`BookmarkStore`](crate::managers::bookmark_store::BookmarkStore) held by `App`.
//! Parameter names use the same camelCase as the persisted records.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::bookmark_store::BookmarkStoreTrait;
use crate::services::settings_engine::SettingsEngineTrait;

fn int_param(params: &Value, name: &str) -> Result<i64, String> {
    params
        .get(name)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| format!("missing {}", name))
}

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Surah bookmarks ───
        "surah.add" => {
            let surah_number = int_param(params, "surahNumber")?;
            let surah_name = str_param(params, "surahName")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.store
                .add_surah_bookmark(surah_number, surah_name)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "surah.remove" => {
            let surah_number = int_param(params, "surahNumber")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.store
                .remove_surah_bookmark(surah_number)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "surah.isBookmarked" => {
            let surah_number = int_param(params, "surahNumber")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"bookmarked": a.store.is_surah_bookmarked(surah_number)}))
        }
        "surah.toggle" => {
            let surah_number = int_param(params, "surahNumber")?;
            let surah_name = str_param(params, "surahName")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let bookmarked = a
                .store
                .toggle_surah_bookmark(surah_number, surah_name)
                .map_err(|e| e.to_string())?;
            Ok(json!({"bookmarked": bookmarked}))
        }
        "surah.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.store.get_all_surah_bookmarks()).map_err(|e| e.to_string())
        }

        // ─── Ayah bookmarks ───
        "ayah.add" => {
            let surah_number = int_param(params, "surahNumber")?;
            let surah_name = str_param(params, "surahName")?;
            let ayah_number = int_param(params, "ayahNumber")?;
            let ayah_text = str_param(params, "ayahText")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.store
                .add_ayah_bookmark(surah_number, surah_name, ayah_number, ayah_text)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "ayah.remove" => {
            let surah_number = int_param(params, "surahNumber")?;
            let ayah_number = int_param(params, "ayahNumber")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.store
                .remove_ayah_bookmark(surah_number, ayah_number)
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "ayah.isBookmarked" => {
            let surah_number = int_param(params, "surahNumber")?;
            let ayah_number = int_param(params, "ayahNumber")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"bookmarked": a.store.is_ayah_bookmarked(surah_number, ayah_number)}))
        }
        "ayah.toggle" => {
            let surah_number = int_param(params, "surahNumber")?;
            let surah_name = str_param(params, "surahName")?;
            let ayah_number = int_param(params, "ayahNumber")?;
            let ayah_text = str_param(params, "ayahText")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let bookmarked = a
                .store
                .toggle_ayah_bookmark(surah_number, surah_name, ayah_number, ayah_text)
                .map_err(|e| e.to_string())?;
            Ok(json!({"bookmarked": bookmarked}))
        }
        "ayah.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            // Optional filter to a single surah.
            let bookmarks = match params.get("surahNumber").and_then(|v| v.as_i64()) {
                Some(surah_number) => a.store.ayah_bookmarks_for_surah(surah_number),
                None => a.store.get_all_ayah_bookmarks(),
            };
            serde_json::to_value(bookmarks).map_err(|e| e.to_string())
        }

        "stats" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({
                "surahBookmarks": a.store.surah_count(),
                "ayahBookmarks": a.store.ayah_count(),
            }))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.settings_engine.get_settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.update_setting(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.reset_settings().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
