//! SQLite schema creation and version tracking.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unsupported schema: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// Idempotent: safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if get_schema_version(conn)? < CURRENT_VERSION {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Open or create a catalog database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }
    create_schema(&conn)?;

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

// Business-key columns are indexed but deliberately not UNIQUE: uniqueness is
// enforced by lookup-before-insert in the importer.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS manufacturers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    country TEXT,
    website TEXT
);
CREATE INDEX IF NOT EXISTS idx_manufacturers_name ON manufacturers(name);

CREATE TABLE IF NOT EXISTS projectiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    manufacturer_id INTEGER NOT NULL REFERENCES manufacturers(id),
    name TEXT NOT NULL,
    caliber TEXT NOT NULL,
    diameter REAL NOT NULL DEFAULT 0,
    weight_grains REAL NOT NULL DEFAULT 0,
    projectile_type TEXT,
    bc_g1 REAL,
    bc_g7 REAL,
    sectional_density REAL,
    notes TEXT
);
CREATE INDEX IF NOT EXISTS idx_projectiles_name ON projectiles(name, manufacturer_id);

CREATE TABLE IF NOT EXISTS cartridges (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    parent_case TEXT,
    case_length REAL NOT NULL DEFAULT 0,
    overall_length REAL NOT NULL DEFAULT 0,
    rim_diameter REAL NOT NULL DEFAULT 0,
    base_diameter REAL NOT NULL DEFAULT 0,
    neck_diameter REAL NOT NULL DEFAULT 0,
    shoulder_angle REAL,
    max_pressure_psi INTEGER NOT NULL DEFAULT 0,
    primer_type TEXT,
    notes TEXT
);
CREATE INDEX IF NOT EXISTS idx_cartridges_name ON cartridges(name);

CREATE TABLE IF NOT EXISTS powders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    manufacturer TEXT NOT NULL,
    name TEXT NOT NULL,
    powder_type TEXT,
    burn_rate_rank REAL,
    notes TEXT
);
CREATE INDEX IF NOT EXISTS idx_powders_key ON powders(name, manufacturer);

CREATE TABLE IF NOT EXISTS primers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    manufacturer TEXT NOT NULL,
    name TEXT NOT NULL,
    primer_type TEXT,
    notes TEXT
);
CREATE INDEX IF NOT EXISTS idx_primers_key ON primers(name, manufacturer);

CREATE TABLE IF NOT EXISTS cartridge_lots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cartridge_id INTEGER REFERENCES cartridges(id),
    lot_number TEXT NOT NULL,
    quantity INTEGER NOT NULL DEFAULT 0,
    times_fired INTEGER,
    annealed BOOLEAN,
    notes TEXT
);
CREATE INDEX IF NOT EXISTS idx_cartridge_lots_key ON cartridge_lots(lot_number, cartridge_id);

CREATE TABLE IF NOT EXISTS factory_ammo (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    manufacturer_id INTEGER NOT NULL REFERENCES manufacturers(id),
    cartridge_id INTEGER REFERENCES cartridges(id),
    projectile_id INTEGER REFERENCES projectiles(id),
    bullet_weight_grains REAL NOT NULL DEFAULT 0,
    advertised_velocity_fps INTEGER,
    advertised_energy_ft_lbs INTEGER,
    test_barrel_length_inches REAL,
    sku TEXT NOT NULL,
    upc TEXT,
    notes TEXT
);
CREATE INDEX IF NOT EXISTS idx_factory_ammo_sku ON factory_ammo(sku);

CREATE TABLE IF NOT EXISTS firearms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    manufacturer TEXT NOT NULL,
    model TEXT NOT NULL,
    caliber TEXT,
    barrel_length_inches REAL NOT NULL DEFAULT 0,
    twist_rate TEXT,
    action_type TEXT,
    serial_number TEXT,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS ammo_lots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cartridge_id INTEGER NOT NULL REFERENCES cartridges(id),
    projectile_id INTEGER NOT NULL REFERENCES projectiles(id),
    powder_id INTEGER REFERENCES powders(id),
    powder_charge_grains REAL,
    cartridge_overall_length REAL,
    quantity INTEGER NOT NULL DEFAULT 0,
    lot_number TEXT,
    date_loaded TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    notes TEXT
);

-- Provenance: one row per imported record, append-only
CREATE TABLE IF NOT EXISTS external_source_map (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    entity_type TEXT NOT NULL,
    entity_id INTEGER NOT NULL,
    source_name TEXT NOT NULL,
    source_id TEXT NOT NULL,
    raw_json TEXT
);
CREATE INDEX IF NOT EXISTS idx_source_map_entity ON external_source_map(entity_type, entity_id);
CREATE INDEX IF NOT EXISTS idx_source_map_source ON external_source_map(source_name, source_id);

-- Import tracking
CREATE TABLE IF NOT EXISTS import_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_name TEXT NOT NULL,
    entity_type TEXT NOT NULL,
    file_path TEXT NOT NULL,
    imported_at TEXT NOT NULL,
    records_created INTEGER NOT NULL DEFAULT 0,
    records_merged INTEGER NOT NULL DEFAULT 0,
    provenance_rows INTEGER NOT NULL DEFAULT 0
);
"#;
