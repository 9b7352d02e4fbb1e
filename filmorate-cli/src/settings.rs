//! Settings file and path resolution.
//!
//! The settings file lives at `~/.config/filmorate/settings.toml`:
//!
//! ```toml
//! [database]
//! path = "/srv/filmorate/filmorate.db"
//!
//! [reference]
//! path = "/srv/filmorate/reference"
//! ```

use std::path::PathBuf;

/// Canonical path to the settings file: `~/.config/filmorate/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("filmorate").join("settings.toml")
}

/// Where the database lives when nothing else says otherwise.
pub(crate) fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("filmorate").join("filmorate.db")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `database.path` in `settings.toml`
/// 3. `<data dir>/filmorate/filmorate.db`
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_setting("database", "path") {
        return p;
    }
    default_db_path()
}

/// Resolve the reference-data directory: CLI override, then
/// `reference.path` in `settings.toml`. `None` means the standard set.
pub(crate) fn resolve_reference_dir(cli_override: Option<PathBuf>) -> Option<PathBuf> {
    cli_override.or_else(|| load_setting("reference", "path"))
}

fn load_setting(table: &str, key: &str) -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    setting_from_str(&contents, table, key)
}

/// Read `table.key` as a path from TOML text. Empty values count as unset.
fn setting_from_str(contents: &str, table: &str, key: &str) -> Option<PathBuf> {
    let doc: toml::Value = contents.parse().ok()?;
    let value = doc.get(table)?.get(key)?.as_str()?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub(crate) fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}
