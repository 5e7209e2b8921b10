// Platform paths
// Resolves per-user config and data directories for the bookmark store.
//
// `directories::ProjectDirs` picks the platform convention:
// - Linux:   ~/.config/quran-bookmarks, ~/.local/share/quran-bookmarks
// - macOS:   ~/Library/Application Support/org.quran-app.quran-bookmarks
// - Windows: %APPDATA%\quran-app\quran-bookmarks\{config,data}

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Overrides the data directory when set.
pub const DATA_DIR_ENV: &str = "QURAN_BOOKMARKS_DATA_DIR";

const APP_NAME: &str = "quran-bookmarks";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "quran-app", APP_NAME)
}

/// Fallback when no home directory can be determined.
fn fallback_dir() -> PathBuf {
    env::temp_dir().join(APP_NAME)
}

/// Returns the configuration directory.
pub fn get_config_dir() -> PathBuf {
    project_dirs()
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| fallback_dir().join("config"))
}

/// Returns the data directory, honouring [`DATA_DIR_ENV`].
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    project_dirs()
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| fallback_dir().join("data"))
}
