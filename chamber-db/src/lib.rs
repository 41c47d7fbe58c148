//! SQLite persistence layer for the reloading catalog.
//!
//! Provides schema creation, CRUD operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, find_cartridge_by_name, find_cartridge_lot, find_factory_ammo_by_sku,
    find_manufacturer_by_name, find_powder, find_primer, find_projectile,
    find_projectile_by_name, insert_ammo_lot, insert_cartridge, insert_cartridge_lot,
    insert_factory_ammo, insert_firearm, insert_import_log, insert_manufacturer, insert_powder,
    insert_primer, insert_projectile, insert_source_map, update_cartridge, update_cartridge_lot,
    update_factory_ammo, update_powder, update_primer, update_projectile,
};
pub use queries::{
    CatalogStats, catalog_stats, get_cartridge, get_cartridge_lot, get_factory_ammo,
    get_manufacturer, get_projectile, list_import_logs, list_manufacturers,
    projectiles_for_manufacturer, provenance_by_source, provenance_for_entity,
};
pub use schema::{SchemaError, open_database, open_memory};
