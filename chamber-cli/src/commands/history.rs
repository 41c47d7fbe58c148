use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::resolve_db_path;

pub(crate) fn run_history(db_path: Option<PathBuf>, limit: u32) -> Result<(), CliError> {
    let db_path = resolve_db_path(db_path);
    let Some(conn) = super::open_existing(&db_path)? else {
        return Ok(());
    };

    let logs = chamber_db::list_import_logs(&conn, Some(limit))
        .map_err(|e| CliError::database(format!("Failed to query import log: {}", e)))?;

    if logs.is_empty() {
        log::info!("No imports recorded yet.");
        return Ok(());
    }

    log::info!(
        "{}",
        "Recent Imports".if_supports_color(Stdout, |t| t.bold()),
    );
    for entry in &logs {
        log::info!(
            "  {}  {:<12} {:>6} new {:>6} merged  {}",
            entry.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
            entry.entity_type,
            entry.records_created,
            entry.records_merged,
            entry.file_path,
        );
    }

    Ok(())
}
