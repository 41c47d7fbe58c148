//! CRUD operations for all catalog entity types.
//!
//! Lookups match business keys with exact, case-sensitive equality. Updates
//! write back only the fields an import is allowed to change; key columns are
//! never touched after insert.

use chamber_catalog::types::*;
use rusqlite::{Connection, Row, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

pub(crate) const MANUFACTURER_COLUMNS: &str = "m.id, m.name, m.country, m.website";

pub(crate) const PROJECTILE_COLUMNS: &str = "p.id, p.manufacturer_id, p.name, p.caliber, p.diameter,
    p.weight_grains, p.projectile_type, p.bc_g1, p.bc_g7, p.sectional_density, p.notes";

pub(crate) const CARTRIDGE_COLUMNS: &str = "c.id, c.name, c.parent_case, c.case_length,
    c.overall_length, c.rim_diameter, c.base_diameter, c.neck_diameter, c.shoulder_angle,
    c.max_pressure_psi, c.primer_type, c.notes";

pub(crate) const POWDER_COLUMNS: &str =
    "id, manufacturer, name, powder_type, burn_rate_rank, notes";

pub(crate) const PRIMER_COLUMNS: &str = "id, manufacturer, name, primer_type, notes";

pub(crate) const CARTRIDGE_LOT_COLUMNS: &str =
    "l.id, l.cartridge_id, l.lot_number, l.quantity, l.times_fired, l.annealed, l.notes";

pub(crate) const FACTORY_AMMO_COLUMNS: &str = "f.id, f.manufacturer_id, f.cartridge_id,
    f.projectile_id, f.bullet_weight_grains, f.advertised_velocity_fps,
    f.advertised_energy_ft_lbs, f.test_barrel_length_inches, f.sku, f.upc, f.notes";

pub(crate) const SOURCE_MAP_COLUMNS: &str =
    "id, entity_type, entity_id, source_name, source_id, raw_json";

// ── Manufacturer Operations ─────────────────────────────────────────────────

/// Find a manufacturer by exact name. Returns the lowest id on duplicates.
pub fn find_manufacturer_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<Manufacturer>, OperationError> {
    let sql = format!(
        "SELECT {MANUFACTURER_COLUMNS} FROM manufacturers m WHERE m.name = ?1 ORDER BY m.id LIMIT 1"
    );
    optional(conn.query_row(&sql, params![name], row_to_manufacturer))
}

/// Insert a manufacturer. Returns the generated ID.
pub fn insert_manufacturer(conn: &Connection, m: &Manufacturer) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO manufacturers (name, country, website) VALUES (?1, ?2, ?3)",
        params![m.name, m.country, m.website],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Projectile Operations ───────────────────────────────────────────────────

/// Find a projectile by its business key: (name, manufacturer name).
pub fn find_projectile(
    conn: &Connection,
    name: &str,
    manufacturer_name: &str,
) -> Result<Option<Projectile>, OperationError> {
    let sql = format!(
        "SELECT {PROJECTILE_COLUMNS}
         FROM projectiles p
         JOIN manufacturers m ON m.id = p.manufacturer_id
         WHERE p.name = ?1 AND m.name = ?2
         ORDER BY p.id LIMIT 1"
    );
    optional(conn.query_row(&sql, params![name, manufacturer_name], row_to_projectile))
}

/// Find the first projectile with the given name, from any manufacturer.
pub fn find_projectile_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<Projectile>, OperationError> {
    let sql = format!(
        "SELECT {PROJECTILE_COLUMNS} FROM projectiles p WHERE p.name = ?1 ORDER BY p.id LIMIT 1"
    );
    optional(conn.query_row(&sql, params![name], row_to_projectile))
}

/// Insert a projectile. Returns the generated ID.
pub fn insert_projectile(conn: &Connection, p: &Projectile) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO projectiles (manufacturer_id, name, caliber, diameter, weight_grains,
             projectile_type, bc_g1, bc_g7, sectional_density, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            p.manufacturer_id,
            p.name,
            p.caliber,
            p.diameter,
            p.weight_grains,
            p.projectile_type,
            p.ballistic_coefficient_g1,
            p.ballistic_coefficient_g7,
            p.sectional_density,
            p.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Write back a projectile's measurement fields.
pub fn update_projectile(conn: &Connection, p: &Projectile) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE projectiles SET diameter = ?2, weight_grains = ?3, bc_g1 = ?4, bc_g7 = ?5,
             sectional_density = ?6
         WHERE id = ?1",
        params![
            p.id,
            p.diameter,
            p.weight_grains,
            p.ballistic_coefficient_g1,
            p.ballistic_coefficient_g7,
            p.sectional_density,
        ],
    )?;
    expect_changed(changed, "projectile", p.id)
}

// ── Cartridge Operations ────────────────────────────────────────────────────

/// Find a cartridge by exact name.
pub fn find_cartridge_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<Cartridge>, OperationError> {
    let sql = format!(
        "SELECT {CARTRIDGE_COLUMNS} FROM cartridges c WHERE c.name = ?1 ORDER BY c.id LIMIT 1"
    );
    optional(conn.query_row(&sql, params![name], row_to_cartridge))
}

/// Insert a cartridge. Returns the generated ID.
pub fn insert_cartridge(conn: &Connection, c: &Cartridge) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO cartridges (name, parent_case, case_length, overall_length, rim_diameter,
             base_diameter, neck_diameter, shoulder_angle, max_pressure_psi, primer_type, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            c.name,
            c.parent_case,
            c.case_length,
            c.overall_length,
            c.rim_diameter,
            c.base_diameter,
            c.neck_diameter,
            c.shoulder_angle,
            c.max_pressure_psi,
            c.primer_type,
            c.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Write back a cartridge's dimensional and pressure fields.
pub fn update_cartridge(conn: &Connection, c: &Cartridge) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE cartridges SET parent_case = ?2, case_length = ?3, overall_length = ?4,
             rim_diameter = ?5, base_diameter = ?6, neck_diameter = ?7, shoulder_angle = ?8,
             max_pressure_psi = ?9, primer_type = ?10
         WHERE id = ?1",
        params![
            c.id,
            c.parent_case,
            c.case_length,
            c.overall_length,
            c.rim_diameter,
            c.base_diameter,
            c.neck_diameter,
            c.shoulder_angle,
            c.max_pressure_psi,
            c.primer_type,
        ],
    )?;
    expect_changed(changed, "cartridge", c.id)
}

// ── Powder Operations ───────────────────────────────────────────────────────

/// Find a powder by (name, manufacturer). No case folding: "CCI" and "cci" differ.
pub fn find_powder(
    conn: &Connection,
    name: &str,
    manufacturer: &str,
) -> Result<Option<Powder>, OperationError> {
    let sql = format!(
        "SELECT {POWDER_COLUMNS} FROM powders WHERE name = ?1 AND manufacturer = ?2
         ORDER BY id LIMIT 1"
    );
    optional(conn.query_row(&sql, params![name, manufacturer], row_to_powder))
}

/// Insert a powder. Returns the generated ID.
pub fn insert_powder(conn: &Connection, p: &Powder) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO powders (manufacturer, name, powder_type, burn_rate_rank, notes)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![p.manufacturer, p.name, p.powder_type, p.burn_rate_rank, p.notes],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_powder(conn: &Connection, p: &Powder) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE powders SET powder_type = ?2, burn_rate_rank = ?3 WHERE id = ?1",
        params![p.id, p.powder_type, p.burn_rate_rank],
    )?;
    expect_changed(changed, "powder", p.id)
}

// ── Primer Operations ───────────────────────────────────────────────────────

/// Find a primer by (name, manufacturer). No case folding.
pub fn find_primer(
    conn: &Connection,
    name: &str,
    manufacturer: &str,
) -> Result<Option<Primer>, OperationError> {
    let sql = format!(
        "SELECT {PRIMER_COLUMNS} FROM primers WHERE name = ?1 AND manufacturer = ?2
         ORDER BY id LIMIT 1"
    );
    optional(conn.query_row(&sql, params![name, manufacturer], row_to_primer))
}

/// Insert a primer. Returns the generated ID.
pub fn insert_primer(conn: &Connection, p: &Primer) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO primers (manufacturer, name, primer_type, notes) VALUES (?1, ?2, ?3, ?4)",
        params![p.manufacturer, p.name, p.primer_type, p.notes],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_primer(conn: &Connection, p: &Primer) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE primers SET primer_type = ?2 WHERE id = ?1",
        params![p.id, p.primer_type],
    )?;
    expect_changed(changed, "primer", p.id)
}

// ── Cartridge Lot Operations ────────────────────────────────────────────────

/// Find a lot by (cartridge name, lot number).
///
/// Lots without a cartridge never match, since the key includes the
/// cartridge's name.
pub fn find_cartridge_lot(
    conn: &Connection,
    cartridge_name: &str,
    lot_number: &str,
) -> Result<Option<CartridgeLot>, OperationError> {
    let sql = format!(
        "SELECT {CARTRIDGE_LOT_COLUMNS}
         FROM cartridge_lots l
         JOIN cartridges c ON c.id = l.cartridge_id
         WHERE c.name = ?1 AND l.lot_number = ?2
         ORDER BY l.id LIMIT 1"
    );
    optional(conn.query_row(&sql, params![cartridge_name, lot_number], row_to_cartridge_lot))
}

/// Insert a cartridge lot. Returns the generated ID.
pub fn insert_cartridge_lot(conn: &Connection, l: &CartridgeLot) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO cartridge_lots (cartridge_id, lot_number, quantity, times_fired, annealed, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![l.cartridge_id, l.lot_number, l.quantity, l.times_fired, l.annealed, l.notes],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_cartridge_lot(conn: &Connection, l: &CartridgeLot) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE cartridge_lots SET quantity = ?2, times_fired = ?3, annealed = ?4 WHERE id = ?1",
        params![l.id, l.quantity, l.times_fired, l.annealed],
    )?;
    expect_changed(changed, "cartridge_lot", l.id)
}

// ── Factory Ammo Operations ─────────────────────────────────────────────────

/// Find factory ammunition by SKU.
pub fn find_factory_ammo_by_sku(
    conn: &Connection,
    sku: &str,
) -> Result<Option<FactoryAmmo>, OperationError> {
    let sql = format!(
        "SELECT {FACTORY_AMMO_COLUMNS} FROM factory_ammo f WHERE f.sku = ?1 ORDER BY f.id LIMIT 1"
    );
    optional(conn.query_row(&sql, params![sku], row_to_factory_ammo))
}

/// Insert factory ammunition. Returns the generated ID.
pub fn insert_factory_ammo(conn: &Connection, f: &FactoryAmmo) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO factory_ammo (manufacturer_id, cartridge_id, projectile_id,
             bullet_weight_grains, advertised_velocity_fps, advertised_energy_ft_lbs,
             test_barrel_length_inches, sku, upc, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            f.manufacturer_id,
            f.cartridge_id,
            f.projectile_id,
            f.bullet_weight_grains,
            f.advertised_velocity_fps,
            f.advertised_energy_ft_lbs,
            f.test_barrel_length_inches,
            f.sku,
            f.upc,
            f.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Write back the advertised-performance fields.
pub fn update_factory_ammo(conn: &Connection, f: &FactoryAmmo) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE factory_ammo SET bullet_weight_grains = ?2, advertised_velocity_fps = ?3,
             advertised_energy_ft_lbs = ?4
         WHERE id = ?1",
        params![
            f.id,
            f.bullet_weight_grains,
            f.advertised_velocity_fps,
            f.advertised_energy_ft_lbs,
        ],
    )?;
    expect_changed(changed, "factory_ammo", f.id)
}

// ── Firearm / Ammo Lot Operations ───────────────────────────────────────────

/// Insert a firearm. Returns the generated ID.
pub fn insert_firearm(conn: &Connection, f: &Firearm) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO firearms (manufacturer, model, caliber, barrel_length_inches, twist_rate,
             action_type, serial_number, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            f.manufacturer,
            f.model,
            f.caliber,
            f.barrel_length_inches,
            f.twist_rate,
            f.action_type,
            f.serial_number,
            f.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert an ammo lot. An empty `date_loaded` takes the database's current timestamp.
pub fn insert_ammo_lot(conn: &Connection, a: &AmmoLot) -> Result<i64, OperationError> {
    let date_loaded = (!a.date_loaded.is_empty()).then_some(a.date_loaded.as_str());
    conn.execute(
        "INSERT INTO ammo_lots (cartridge_id, projectile_id, powder_id, powder_charge_grains,
             cartridge_overall_length, quantity, lot_number, date_loaded, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, COALESCE(?8, CURRENT_TIMESTAMP), ?9)",
        params![
            a.cartridge_id,
            a.projectile_id,
            a.powder_id,
            a.powder_charge_grains,
            a.cartridge_overall_length,
            a.quantity,
            a.lot_number,
            date_loaded,
            a.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Provenance Operations ───────────────────────────────────────────────────

/// Append a provenance row. Returns the generated ID.
pub fn insert_source_map(
    conn: &Connection,
    map: &ExternalSourceMap,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO external_source_map (entity_type, entity_id, source_name, source_id, raw_json)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            map.entity_type,
            map.entity_id,
            map.source_name,
            map.source_id,
            map.raw_json,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry. Returns the generated ID.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_name, entity_type, file_path, imported_at,
             records_created, records_merged, provenance_rows)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log.source_name,
            log.entity_type,
            log.file_path,
            log.imported_at,
            log.records_created,
            log.records_merged,
            log.provenance_rows,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Row Mapping ─────────────────────────────────────────────────────────────

pub(crate) fn row_to_manufacturer(row: &Row<'_>) -> rusqlite::Result<Manufacturer> {
    Ok(Manufacturer {
        id: row.get(0)?,
        name: row.get(1)?,
        country: row.get(2)?,
        website: row.get(3)?,
    })
}

pub(crate) fn row_to_projectile(row: &Row<'_>) -> rusqlite::Result<Projectile> {
    Ok(Projectile {
        id: row.get(0)?,
        manufacturer_id: row.get(1)?,
        name: row.get(2)?,
        caliber: row.get(3)?,
        diameter: row.get(4)?,
        weight_grains: row.get(5)?,
        projectile_type: row.get(6)?,
        ballistic_coefficient_g1: row.get(7)?,
        ballistic_coefficient_g7: row.get(8)?,
        sectional_density: row.get(9)?,
        notes: row.get(10)?,
    })
}

pub(crate) fn row_to_cartridge(row: &Row<'_>) -> rusqlite::Result<Cartridge> {
    Ok(Cartridge {
        id: row.get(0)?,
        name: row.get(1)?,
        parent_case: row.get(2)?,
        case_length: row.get(3)?,
        overall_length: row.get(4)?,
        rim_diameter: row.get(5)?,
        base_diameter: row.get(6)?,
        neck_diameter: row.get(7)?,
        shoulder_angle: row.get(8)?,
        max_pressure_psi: row.get(9)?,
        primer_type: row.get(10)?,
        notes: row.get(11)?,
    })
}

pub(crate) fn row_to_powder(row: &Row<'_>) -> rusqlite::Result<Powder> {
    Ok(Powder {
        id: row.get(0)?,
        manufacturer: row.get(1)?,
        name: row.get(2)?,
        powder_type: row.get(3)?,
        burn_rate_rank: row.get(4)?,
        notes: row.get(5)?,
    })
}

pub(crate) fn row_to_primer(row: &Row<'_>) -> rusqlite::Result<Primer> {
    Ok(Primer {
        id: row.get(0)?,
        manufacturer: row.get(1)?,
        name: row.get(2)?,
        primer_type: row.get(3)?,
        notes: row.get(4)?,
    })
}

pub(crate) fn row_to_cartridge_lot(row: &Row<'_>) -> rusqlite::Result<CartridgeLot> {
    Ok(CartridgeLot {
        id: row.get(0)?,
        cartridge_id: row.get(1)?,
        lot_number: row.get(2)?,
        quantity: row.get(3)?,
        times_fired: row.get(4)?,
        annealed: row.get(5)?,
        notes: row.get(6)?,
    })
}

pub(crate) fn row_to_factory_ammo(row: &Row<'_>) -> rusqlite::Result<FactoryAmmo> {
    Ok(FactoryAmmo {
        id: row.get(0)?,
        manufacturer_id: row.get(1)?,
        cartridge_id: row.get(2)?,
        projectile_id: row.get(3)?,
        bullet_weight_grains: row.get(4)?,
        advertised_velocity_fps: row.get(5)?,
        advertised_energy_ft_lbs: row.get(6)?,
        test_barrel_length_inches: row.get(7)?,
        sku: row.get(8)?,
        upc: row.get(9)?,
        notes: row.get(10)?,
    })
}

pub(crate) fn row_to_source_map(row: &Row<'_>) -> rusqlite::Result<ExternalSourceMap> {
    Ok(ExternalSourceMap {
        id: row.get(0)?,
        entity_type: row.get(1)?,
        entity_id: row.get(2)?,
        source_name: row.get(3)?,
        source_id: row.get(4)?,
        raw_json: row.get(5)?,
    })
}

// ── Helpers ─────────────────────────────────────────────────────────────────

pub(crate) fn optional<T>(result: rusqlite::Result<T>) -> Result<Option<T>, OperationError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn expect_changed(changed: usize, entity_type: &str, id: i64) -> Result<(), OperationError> {
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        });
    }
    Ok(())
}
