//! Read queries for the catalog database.
//!
//! Provides lookup by id, provenance trails, listings, and statistics.

use chamber_catalog::types::*;
use rusqlite::{Connection, params};

use crate::operations::{
    CARTRIDGE_COLUMNS, CARTRIDGE_LOT_COLUMNS, FACTORY_AMMO_COLUMNS, MANUFACTURER_COLUMNS,
    OperationError, PROJECTILE_COLUMNS, SOURCE_MAP_COLUMNS, optional, row_to_cartridge,
    row_to_cartridge_lot, row_to_factory_ammo, row_to_manufacturer, row_to_projectile,
    row_to_source_map,
};

// ── Lookups by Id ───────────────────────────────────────────────────────────

pub fn get_manufacturer(conn: &Connection, id: i64) -> Result<Option<Manufacturer>, OperationError> {
    let sql = format!("SELECT {MANUFACTURER_COLUMNS} FROM manufacturers m WHERE m.id = ?1");
    optional(conn.query_row(&sql, params![id], row_to_manufacturer))
}

pub fn get_projectile(conn: &Connection, id: i64) -> Result<Option<Projectile>, OperationError> {
    let sql = format!("SELECT {PROJECTILE_COLUMNS} FROM projectiles p WHERE p.id = ?1");
    optional(conn.query_row(&sql, params![id], row_to_projectile))
}

pub fn get_cartridge(conn: &Connection, id: i64) -> Result<Option<Cartridge>, OperationError> {
    let sql = format!("SELECT {CARTRIDGE_COLUMNS} FROM cartridges c WHERE c.id = ?1");
    optional(conn.query_row(&sql, params![id], row_to_cartridge))
}

pub fn get_cartridge_lot(
    conn: &Connection,
    id: i64,
) -> Result<Option<CartridgeLot>, OperationError> {
    let sql = format!("SELECT {CARTRIDGE_LOT_COLUMNS} FROM cartridge_lots l WHERE l.id = ?1");
    optional(conn.query_row(&sql, params![id], row_to_cartridge_lot))
}

pub fn get_factory_ammo(conn: &Connection, id: i64) -> Result<Option<FactoryAmmo>, OperationError> {
    let sql = format!("SELECT {FACTORY_AMMO_COLUMNS} FROM factory_ammo f WHERE f.id = ?1");
    optional(conn.query_row(&sql, params![id], row_to_factory_ammo))
}

// ── Listings ────────────────────────────────────────────────────────────────

/// List all manufacturers ordered by name.
pub fn list_manufacturers(conn: &Connection) -> Result<Vec<Manufacturer>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MANUFACTURER_COLUMNS} FROM manufacturers m ORDER BY m.name, m.id"
    ))?;
    let rows = stmt.query_map([], row_to_manufacturer)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// All projectiles made by one manufacturer.
pub fn projectiles_for_manufacturer(
    conn: &Connection,
    manufacturer_id: i64,
) -> Result<Vec<Projectile>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROJECTILE_COLUMNS} FROM projectiles p WHERE p.manufacturer_id = ?1
         ORDER BY p.name"
    ))?;
    let rows = stmt.query_map(params![manufacturer_id], row_to_projectile)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Provenance Queries ──────────────────────────────────────────────────────

/// Every provenance row for one entity, oldest first.
pub fn provenance_for_entity(
    conn: &Connection,
    entity_type: EntityType,
    entity_id: i64,
) -> Result<Vec<ExternalSourceMap>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SOURCE_MAP_COLUMNS} FROM external_source_map
         WHERE entity_type = ?1 AND entity_id = ?2 ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![entity_type.as_str(), entity_id], row_to_source_map)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Every provenance row recorded for one external record, oldest first.
pub fn provenance_by_source(
    conn: &Connection,
    source_name: &str,
    source_id: &str,
) -> Result<Vec<ExternalSourceMap>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SOURCE_MAP_COLUMNS} FROM external_source_map
         WHERE source_name = ?1 AND source_id = ?2 ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![source_name, source_id], row_to_source_map)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |table: &str| -> Result<i64, OperationError> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
    };

    Ok(CatalogStats {
        manufacturers: count("manufacturers")?,
        projectiles: count("projectiles")?,
        cartridges: count("cartridges")?,
        powders: count("powders")?,
        primers: count("primers")?,
        cartridge_lots: count("cartridge_lots")?,
        factory_ammo: count("factory_ammo")?,
        firearms: count("firearms")?,
        ammo_lots: count("ammo_lots")?,
        provenance_rows: count("external_source_map")?,
        imports: count("import_log")?,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub manufacturers: i64,
    pub projectiles: i64,
    pub cartridges: i64,
    pub powders: i64,
    pub primers: i64,
    pub cartridge_lots: i64,
    pub factory_ammo: i64,
    pub firearms: i64,
    pub ammo_lots: i64,
    pub provenance_rows: i64,
    pub imports: i64,
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import logs, newest first.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, source_name, entity_type, file_path, imported_at,
                records_created, records_merged, provenance_rows
         FROM import_log ORDER BY id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source_name: row.get(1)?,
            entity_type: row.get(2)?,
            file_path: row.get(3)?,
            imported_at: row.get(4)?,
            records_created: row.get(5)?,
            records_merged: row.get(6)?,
            provenance_rows: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
