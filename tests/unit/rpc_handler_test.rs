//! Unit tests for the RPC handler: every method dispatched by `handle_method`,
//! through the same code path as the `quran-bookmarks-rpc` binary, against a
//! temporary on-disk SQLite store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::json;
use tempfile::TempDir;

use quran_bookmarks::app::App;
use quran_bookmarks::managers::bookmark_store::BookmarkStoreTrait;
use quran_bookmarks::rpc_handler::handle_method;
use quran_bookmarks::services::clock::ManualClock;
use quran_bookmarks::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use quran_bookmarks::types::settings::StoreSettings;

/// Settings engine whose config file lives in `dir`, loaded from disk.
fn engine_in(dir: &Path) -> SettingsEngine {
    let mut engine = SettingsEngine::new(Some(dir.join("settings.json").to_string_lossy().to_string()));
    engine.load().expect("Failed to load settings");
    engine
}

/// Create a fresh App backed by a temp directory DB.
fn setup() -> (Mutex<App>, TempDir) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let app = App::with_clock(
        engine_in(tmp.path()),
        tmp.path(),
        Arc::new(ManualClock::new(1_700_000_000_000)),
    )
    .expect("Failed to init App");
    (Mutex::new(app), tmp)
}

#[test]
fn test_ping() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "ping", &json!({})).unwrap();
    assert_eq!(res, json!({"pong": true}));
}

#[test]
fn test_unknown_method_returns_error() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "nonexistent.method", &json!({}));
    assert!(res.unwrap_err().contains("unknown method"));
}

// ─── Surahs ───

#[test]
fn test_surah_add_and_list() {
    let (app, _tmp) = setup();

    handle_method(&app, "surah.add", &json!({"surahNumber": 36, "surahName": "Ya-Sin"})).unwrap();
    handle_method(&app, "surah.add", &json!({"surahNumber": 1, "surahName": "Al-Fatihah"})).unwrap();

    let list = handle_method(&app, "surah.list", &json!({})).unwrap();
    assert_eq!(
        list,
        json!([
            {"surahNumber": 1, "surahName": "Al-Fatihah", "timestamp": 1_700_000_000_000i64},
            {"surahNumber": 36, "surahName": "Ya-Sin", "timestamp": 1_700_000_000_000i64}
        ])
    );
}

#[test]
fn test_surah_is_bookmarked_and_remove() {
    let (app, _tmp) = setup();

    handle_method(&app, "surah.add", &json!({"surahNumber": 2, "surahName": "Al-Baqarah"})).unwrap();
    let res = handle_method(&app, "surah.isBookmarked", &json!({"surahNumber": 2})).unwrap();
    assert_eq!(res, json!({"bookmarked": true}));

    handle_method(&app, "surah.remove", &json!({"surahNumber": 2})).unwrap();
    let res = handle_method(&app, "surah.isBookmarked", &json!({"surahNumber": 2})).unwrap();
    assert_eq!(res, json!({"bookmarked": false}));

    // Removing again is fine.
    assert!(handle_method(&app, "surah.remove", &json!({"surahNumber": 2})).is_ok());
}

#[test]
fn test_surah_toggle() {
    let (app, _tmp) = setup();
    let params = json!({"surahNumber": 67, "surahName": "Al-Mulk"});

    let res = handle_method(&app, "surah.toggle", &params).unwrap();
    assert_eq!(res, json!({"bookmarked": true}));
    let res = handle_method(&app, "surah.toggle", &params).unwrap();
    assert_eq!(res, json!({"bookmarked": false}));
}

#[test]
fn test_surah_add_missing_params() {
    let (app, _tmp) = setup();
    let err = handle_method(&app, "surah.add", &json!({"surahNumber": 1})).unwrap_err();
    assert_eq!(err, "missing surahName");
    let err = handle_method(&app, "surah.add", &json!({"surahName": "x"})).unwrap_err();
    assert_eq!(err, "missing surahNumber");
}

// ─── Ayahs ───

#[test]
fn test_ayah_add_list_and_filter() {
    let (app, _tmp) = setup();

    for (s, a) in [(3, 8), (2, 286), (2, 255)] {
        handle_method(
            &app,
            "ayah.add",
            &json!({"surahNumber": s, "surahName": "S", "ayahNumber": a, "ayahText": "t"}),
        )
        .unwrap();
    }

    let list = handle_method(&app, "ayah.list", &json!({})).unwrap();
    let keys: Vec<(i64, i64)> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|b| (b["surahNumber"].as_i64().unwrap(), b["ayahNumber"].as_i64().unwrap()))
        .collect();
    assert_eq!(keys, vec![(2, 255), (2, 286), (3, 8)]);

    let filtered = handle_method(&app, "ayah.list", &json!({"surahNumber": 3})).unwrap();
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    assert_eq!(filtered[0]["ayahText"], "t");
}

#[test]
fn test_ayah_remove_and_toggle() {
    let (app, _tmp) = setup();
    let params = json!({"surahNumber": 2, "surahName": "Al-Baqarah", "ayahNumber": 255, "ayahText": "Allahu"});

    let res = handle_method(&app, "ayah.toggle", &params).unwrap();
    assert_eq!(res, json!({"bookmarked": true}));

    let res = handle_method(&app, "ayah.isBookmarked", &json!({"surahNumber": 2, "ayahNumber": 255})).unwrap();
    assert_eq!(res, json!({"bookmarked": true}));

    handle_method(&app, "ayah.remove", &json!({"surahNumber": 2, "ayahNumber": 255})).unwrap();
    let res = handle_method(&app, "ayah.isBookmarked", &json!({"surahNumber": 2, "ayahNumber": 255})).unwrap();
    assert_eq!(res, json!({"bookmarked": false}));
}

#[test]
fn test_stats_counts_both_collections() {
    let (app, _tmp) = setup();
    handle_method(&app, "surah.add", &json!({"surahNumber": 1, "surahName": "Al-Fatihah"})).unwrap();
    handle_method(
        &app,
        "ayah.add",
        &json!({"surahNumber": 1, "surahName": "Al-Fatihah", "ayahNumber": 1, "ayahText": ""}),
    )
    .unwrap();

    let res = handle_method(&app, "stats", &json!({})).unwrap();
    assert_eq!(res, json!({"surahBookmarks": 1, "ayahBookmarks": 1}));
}

/// Bookmarks added over RPC survive re-opening the App on the same data dir.
#[test]
fn test_bookmarks_persist_across_app_restart() {
    let tmp = TempDir::new().unwrap();
    {
        let app = Mutex::new(App::open(engine_in(tmp.path()), tmp.path()).unwrap());
        handle_method(&app, "surah.add", &json!({"surahNumber": 18, "surahName": "Al-Kahf"})).unwrap();
    }

    let app = App::open(engine_in(tmp.path()), tmp.path()).unwrap();
    assert!(app.store.is_surah_bookmarked(18));
    assert!(tmp.path().join("bookmarks.db").exists());
}

// ─── Settings ───

#[test]
fn test_settings_get_returns_defaults() {
    let (app, _tmp) = setup();
    let res = handle_method(&app, "settings.get", &json!({})).unwrap();
    assert_eq!(res, serde_json::to_value(StoreSettings::default()).unwrap());
    assert_eq!(res["storage"]["backend"], "sqlite");
}

/// Switching the backend reopens the store on the new backend and persists
/// the choice for the next start.
#[test]
fn test_settings_set_backend_reopens_store() {
    let (app, tmp) = setup();
    handle_method(&app, "surah.add", &json!({"surahNumber": 1, "surahName": "Al-Fatihah"})).unwrap();

    handle_method(&app, "settings.set", &json!({"key": "storage.backend", "value": "file"})).unwrap();
    let res = handle_method(&app, "surah.isBookmarked", &json!({"surahNumber": 1})).unwrap();
    assert_eq!(res, json!({"bookmarked": false}));

    handle_method(&app, "surah.add", &json!({"surahNumber": 112, "surahName": "Al-Ikhlas"})).unwrap();
    assert!(tmp.path().join("slots").join("quran-app-surah-bookmarks.json").exists());

    drop(app);
    let reopened = App::open(engine_in(tmp.path()), tmp.path()).unwrap();
    assert!(reopened.store.is_surah_bookmarked(112));
    assert!(!reopened.store.is_surah_bookmarked(1));
}

#[test]
fn test_settings_set_rejects_bad_input() {
    let (app, _tmp) = setup();

    let err = handle_method(&app, "settings.set", &json!({"value": "file"})).unwrap_err();
    assert_eq!(err, "missing key");
    let err = handle_method(&app, "settings.set", &json!({"key": "storage.backend"})).unwrap_err();
    assert_eq!(err, "missing value");

    assert!(handle_method(&app, "settings.set", &json!({"key": "storage.nope", "value": 1})).is_err());
    assert!(handle_method(&app, "settings.set", &json!({"key": "storage.backend", "value": "postgres"})).is_err());

    let res = handle_method(&app, "settings.get", &json!({})).unwrap();
    assert_eq!(res["storage"]["backend"], "sqlite");
}

#[test]
fn test_settings_reset_returns_to_default_store() {
    let (app, tmp) = setup();
    handle_method(&app, "surah.add", &json!({"surahNumber": 36, "surahName": "Ya-Sin"})).unwrap();
    handle_method(&app, "settings.set", &json!({"key": "storage.backend", "value": "memory"})).unwrap();
    let res = handle_method(&app, "stats", &json!({})).unwrap();
    assert_eq!(res["surahBookmarks"], 0);

    handle_method(&app, "settings.reset", &json!({})).unwrap();
    let res = handle_method(&app, "surah.isBookmarked", &json!({"surahNumber": 36})).unwrap();
    assert_eq!(res, json!({"bookmarked": true}));
    assert_eq!(engine_in(tmp.path()).get_settings(), &StoreSettings::default());
}
