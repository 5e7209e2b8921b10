//! Bookmark RPC server: JSON-RPC over stdin/stdout for a presentation process.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"surah.add", "params":{"surahNumber":36,"surahName":"Ya-Sin"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use std::io::{self, BufRead, Write};
use std::process;
use std::sync::Mutex;

use quran_bookmarks::app::App;
use quran_bookmarks::logging;
use quran_bookmarks::platform;
use quran_bookmarks::rpc_handler::handle_method;
use quran_bookmarks::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use serde_json::{json, Value};

fn respond(out: &mut impl Write, response: &Value) -> io::Result<()> {
    writeln!(out, "{}", response)?;
    out.flush()
}

fn main() {
    let mut engine = SettingsEngine::new(std::env::var("QURAN_BOOKMARKS_CONFIG").ok());
    let settings = match engine.load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to load settings from {}: {}", engine.get_config_path(), e);
            process::exit(1);
        }
    };

    logging::init(&settings.logging.filter);
    tracing::info!(config = engine.get_config_path(), "quran-bookmarks-rpc starting");

    let data_dir = platform::get_data_dir();
    let app = match App::open(engine, &data_dir) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            tracing::error!(error = %e, data_dir = %data_dir.display(), "failed to open bookmark store");
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    if respond(&mut out, &ready).is_err() {
        return;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or(json!({}));

                match handle_method(&app, method, &params) {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => {
                        tracing::debug!(method, error = %err, "rpc call failed");
                        json!({"id": id, "error": err})
                    }
                }
            }
            Err(e) => json!({"id": null, "error": format!("parse error: {}", e)}),
        };

        if respond(&mut out, &response).is_err() {
            break;
        }
    }

    tracing::info!("stdin closed, shutting down");
}
