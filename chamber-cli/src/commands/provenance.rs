use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use chamber_catalog::EntityType;

use crate::CliError;
use crate::settings::resolve_db_path;

use super::truncate_str;

/// List every provenance row recorded for one entity.
pub(crate) fn run_provenance(
    entity_type: &str,
    id: i64,
    db_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let Some(entity_type) = EntityType::from_str_loose(entity_type) else {
        let known: Vec<&str> = EntityType::ALL.iter().map(|t| t.as_str()).collect();
        return Err(CliError::other(format!(
            "Unknown entity type '{}' (expected one of: {})",
            entity_type,
            known.join(", ")
        )));
    };

    let db_path = resolve_db_path(db_path);
    let Some(conn) = super::open_existing(&db_path)? else {
        return Ok(());
    };

    let rows = chamber_db::provenance_for_entity(&conn, entity_type, id)
        .map_err(|e| CliError::database(format!("Failed to query provenance: {}", e)))?;

    if rows.is_empty() {
        log::info!("No provenance recorded for {} {}", entity_type, id);
        return Ok(());
    }

    log::info!(
        "{}",
        format!("Provenance for {} {}", entity_type, id).if_supports_color(Stdout, |t| t.bold()),
    );
    for row in &rows {
        log::info!(
            "  {:>6}  {} {}  {}",
            format!("#{}", row.id).if_supports_color(Stdout, |t| t.dimmed()),
            row.source_name.if_supports_color(Stdout, |t| t.cyan()),
            row.source_id,
            truncate_str(row.raw_json.as_deref().unwrap_or("-"), 80),
        );
    }

    Ok(())
}
