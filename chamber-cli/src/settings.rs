//! Settings file handling (`~/.config/chamber/settings.toml`).
//!
//! Only `database.path` is interpreted; any other keys are preserved on write.

use std::io;
use std::path::{Path, PathBuf};

/// Canonical path to the settings file: `<config_dir>/chamber/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("chamber").join("settings.toml")
}

/// Fallback database location: `<data_dir>/chamber/chamber.db`.
pub(crate) fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("chamber").join("chamber.db")
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. [`default_db_path`]
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    read_db_path(&settings_path()).unwrap_or_else(default_db_path)
}

/// Read `database.path` from a settings file, if set.
pub(crate) fn read_db_path(settings: &Path) -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let path = doc.get("database")?.get("path")?.as_str()?;
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Save `database.path` into the settings file at `settings`.
///
/// Edits the parsed `toml::Value` in place so unrelated keys survive, and
/// writes through a temp file + rename. A file that does not parse is left
/// untouched and reported as `InvalidData`.
pub(crate) fn write_db_path(settings: &Path, db_path: &Path) -> io::Result<()> {
    let mut doc: toml::Value = match std::fs::read_to_string(settings) {
        Ok(contents) => contents.parse::<toml::Value>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is not valid TOML: {}", settings.display(), e),
            )
        })?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => toml::Value::Table(Default::default()),
        Err(e) => return Err(e),
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let database = table
        .entry("database")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let db_table = database
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[database] is not a table"))?;
    db_table.insert(
        "path".to_string(),
        toml::Value::String(db_path.to_string_lossy().into_owned()),
    );

    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load a settings file as a pretty-printed TOML string for display.
pub(crate) fn load_settings_string(settings: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(settings).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}
