pub(crate) mod config;
pub(crate) mod history;
pub(crate) mod import;
pub(crate) mod provenance;
pub(crate) mod stats;

use std::path::Path;

use rusqlite::Connection;

use crate::CliError;

/// Open an existing catalog database for a read-only command.
///
/// Returns `Ok(None)` (after telling the user how to create one) when the
/// file does not exist, so read commands never create an empty database.
pub(crate) fn open_existing(db_path: &Path) -> Result<Option<Connection>, CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'chamber import <folder>' to create one.");
        return Ok(None);
    }
    let conn = chamber_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))?;
    Ok(Some(conn))
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate_str("ELD-X", 10), "ELD-X");
    }

    #[test]
    fn truncate_long_string() {
        assert_eq!(truncate_str("6.5 Creedmoor", 8), "6.5 C...");
        assert_eq!(truncate_str("abcdef", 2), "ab");
    }

    #[test]
    fn missing_database_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        assert!(open_existing(&path).unwrap().is_none());
        assert!(!path.exists());
    }
}
