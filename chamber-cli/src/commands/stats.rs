use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings::resolve_db_path;

pub(crate) fn run_stats(db_path: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = resolve_db_path(db_path);
    let Some(conn) = super::open_existing(&db_path)? else {
        return Ok(());
    };

    let stats = chamber_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    log::info!("");
    log::info!("  Manufacturers:  {:>8}", stats.manufacturers);
    log::info!("  Projectiles:    {:>8}", stats.projectiles);
    log::info!("  Cartridges:     {:>8}", stats.cartridges);
    log::info!("  Powders:        {:>8}", stats.powders);
    log::info!("  Primers:        {:>8}", stats.primers);
    log::info!("  Case lots:      {:>8}", stats.cartridge_lots);
    log::info!("  Factory ammo:   {:>8}", stats.factory_ammo);
    log::info!("  Firearms:       {:>8}", stats.firearms);
    log::info!("  Ammo lots:      {:>8}", stats.ammo_lots);
    log::info!("");
    log::info!("  Provenance:     {:>8}", stats.provenance_rows);
    log::info!("  Imports:        {:>8}", stats.imports);

    Ok(())
}
