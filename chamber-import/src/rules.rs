//! Mapping rules for the six GRT entity types.
//!
//! Reference policy is asymmetric: an unknown manufacturer gets a name-only
//! stub row, while an unknown cartridge or projectile is left null.

use chamber_catalog::types::*;
use chamber_db::operations::{self, OperationError};
use rusqlite::Connection;

use crate::engine::{ImportError, ImportRules};
use crate::records::*;

/// Resolve a manufacturer id by exact name, inserting a stub when absent.
pub fn find_or_stub_manufacturer(conn: &Connection, name: &str) -> Result<i64, ImportError> {
    if let Some(m) = operations::find_manufacturer_by_name(conn, name)? {
        return Ok(m.id);
    }
    log::debug!("Creating stub manufacturer '{}'", name);
    let id = operations::insert_manufacturer(conn, &Manufacturer::stub(name))?;
    Ok(id)
}

/// Resolve an optional cartridge name to an id. Null or unknown names give `None`.
fn find_cartridge_id(conn: &Connection, name: Option<&str>) -> Result<Option<i64>, ImportError> {
    match name {
        Some(name) => Ok(operations::find_cartridge_by_name(conn, name)?.map(|c| c.id)),
        None => Ok(None),
    }
}

// ── Projectile ──────────────────────────────────────────────────────────────

/// Key: (Name, Manufacturer). Merges measurements only.
pub struct ProjectileRules;

impl ImportRules for ProjectileRules {
    const ENTITY_TYPE: EntityType = EntityType::Projectile;
    type Record = ProjectileRecord;
    type Entity = Projectile;

    fn external_id(record: &ProjectileRecord) -> &str {
        &record.id
    }

    fn find_existing(
        conn: &Connection,
        record: &ProjectileRecord,
    ) -> Result<Option<Projectile>, ImportError> {
        Ok(operations::find_projectile(conn, &record.name, &record.manufacturer)?)
    }

    fn map_new(conn: &Connection, record: &ProjectileRecord) -> Result<Projectile, ImportError> {
        let manufacturer_id = find_or_stub_manufacturer(conn, &record.manufacturer)?;
        Ok(Projectile {
            id: 0,
            manufacturer_id,
            name: record.name.clone(),
            caliber: record.caliber.clone(),
            diameter: record.diameter,
            weight_grains: record.weight,
            projectile_type: record.projectile_type.clone(),
            ballistic_coefficient_g1: record.bc_g1,
            ballistic_coefficient_g7: record.bc_g7,
            sectional_density: record.sd,
            notes: None,
        })
    }

    fn merge(entity: &mut Projectile, record: &ProjectileRecord) {
        entity.diameter = record.diameter;
        entity.weight_grains = record.weight;
        entity.ballistic_coefficient_g1 = record.bc_g1;
        entity.ballistic_coefficient_g7 = record.bc_g7;
        entity.sectional_density = record.sd;
    }

    fn insert(conn: &Connection, entity: &Projectile) -> Result<i64, OperationError> {
        operations::insert_projectile(conn, entity)
    }

    fn update(conn: &Connection, entity: &Projectile) -> Result<(), OperationError> {
        operations::update_projectile(conn, entity)
    }

    fn entity_id(entity: &Projectile) -> i64 {
        entity.id
    }
}

// ── Cartridge ───────────────────────────────────────────────────────────────

/// Key: Name. Merges every dimension, pressure and primer field.
pub struct CartridgeRules;

impl ImportRules for CartridgeRules {
    const ENTITY_TYPE: EntityType = EntityType::Cartridge;
    type Record = CartridgeRecord;
    type Entity = Cartridge;

    fn external_id(record: &CartridgeRecord) -> &str {
        &record.id
    }

    fn find_existing(
        conn: &Connection,
        record: &CartridgeRecord,
    ) -> Result<Option<Cartridge>, ImportError> {
        Ok(operations::find_cartridge_by_name(conn, &record.name)?)
    }

    fn map_new(_conn: &Connection, record: &CartridgeRecord) -> Result<Cartridge, ImportError> {
        let mut cartridge = Cartridge {
            name: record.name.clone(),
            ..Default::default()
        };
        Self::merge(&mut cartridge, record);
        Ok(cartridge)
    }

    fn merge(entity: &mut Cartridge, record: &CartridgeRecord) {
        entity.parent_case = record.parent_case.clone();
        entity.case_length = record.case_length;
        entity.overall_length = record.overall_length;
        entity.rim_diameter = record.rim_diameter;
        entity.base_diameter = record.base_diameter;
        entity.neck_diameter = record.neck_diameter;
        entity.shoulder_angle = record.shoulder_angle;
        entity.max_pressure_psi = record.max_pressure_psi;
        entity.primer_type = record.primer_type.clone();
    }

    fn insert(conn: &Connection, entity: &Cartridge) -> Result<i64, OperationError> {
        operations::insert_cartridge(conn, entity)
    }

    fn update(conn: &Connection, entity: &Cartridge) -> Result<(), OperationError> {
        operations::update_cartridge(conn, entity)
    }

    fn entity_id(entity: &Cartridge) -> i64 {
        entity.id
    }
}

// ── Powder ──────────────────────────────────────────────────────────────────

/// Key: (Name, Manufacturer) as literal strings.
pub struct PowderRules;

impl ImportRules for PowderRules {
    const ENTITY_TYPE: EntityType = EntityType::Powder;
    type Record = PowderRecord;
    type Entity = Powder;

    fn external_id(record: &PowderRecord) -> &str {
        &record.id
    }

    fn find_existing(
        conn: &Connection,
        record: &PowderRecord,
    ) -> Result<Option<Powder>, ImportError> {
        Ok(operations::find_powder(conn, &record.name, &record.manufacturer)?)
    }

    fn map_new(_conn: &Connection, record: &PowderRecord) -> Result<Powder, ImportError> {
        Ok(Powder {
            id: 0,
            manufacturer: record.manufacturer.clone(),
            name: record.name.clone(),
            powder_type: record.powder_type.clone(),
            burn_rate_rank: record.burn_rate,
            notes: None,
        })
    }

    fn merge(entity: &mut Powder, record: &PowderRecord) {
        entity.powder_type = record.powder_type.clone();
        entity.burn_rate_rank = record.burn_rate;
    }

    fn insert(conn: &Connection, entity: &Powder) -> Result<i64, OperationError> {
        operations::insert_powder(conn, entity)
    }

    fn update(conn: &Connection, entity: &Powder) -> Result<(), OperationError> {
        operations::update_powder(conn, entity)
    }

    fn entity_id(entity: &Powder) -> i64 {
        entity.id
    }
}

// ── Primer ──────────────────────────────────────────────────────────────────

/// Key: (Name, Manufacturer) as literal strings.
pub struct PrimerRules;

impl ImportRules for PrimerRules {
    const ENTITY_TYPE: EntityType = EntityType::Primer;
    type Record = PrimerRecord;
    type Entity = Primer;

    fn external_id(record: &PrimerRecord) -> &str {
        &record.id
    }

    fn find_existing(
        conn: &Connection,
        record: &PrimerRecord,
    ) -> Result<Option<Primer>, ImportError> {
        Ok(operations::find_primer(conn, &record.name, &record.manufacturer)?)
    }

    fn map_new(_conn: &Connection, record: &PrimerRecord) -> Result<Primer, ImportError> {
        Ok(Primer {
            id: 0,
            manufacturer: record.manufacturer.clone(),
            name: record.name.clone(),
            primer_type: record.primer_type.clone(),
            notes: None,
        })
    }

    fn merge(entity: &mut Primer, record: &PrimerRecord) {
        entity.primer_type = record.primer_type.clone();
    }

    fn insert(conn: &Connection, entity: &Primer) -> Result<i64, OperationError> {
        operations::insert_primer(conn, entity)
    }

    fn update(conn: &Connection, entity: &Primer) -> Result<(), OperationError> {
        operations::update_primer(conn, entity)
    }

    fn entity_id(entity: &Primer) -> i64 {
        entity.id
    }
}

// ── Cartridge Lot ("Case") ──────────────────────────────────────────────────

/// Key: (CartridgeName, Id as lot number). An unknown cartridge leaves the
/// lot unlinked.
pub struct CaseRules;

impl ImportRules for CaseRules {
    const ENTITY_TYPE: EntityType = EntityType::CartridgeLot;
    type Record = CaseRecord;
    type Entity = CartridgeLot;

    fn external_id(record: &CaseRecord) -> &str {
        &record.id
    }

    fn find_existing(
        conn: &Connection,
        record: &CaseRecord,
    ) -> Result<Option<CartridgeLot>, ImportError> {
        let Some(cartridge_name) = record.cartridge_name.as_deref() else {
            return Ok(None);
        };
        Ok(operations::find_cartridge_lot(
            conn,
            cartridge_name,
            &record.id,
        )?)
    }

    fn map_new(conn: &Connection, record: &CaseRecord) -> Result<CartridgeLot, ImportError> {
        let cartridge_id = find_cartridge_id(conn, record.cartridge_name.as_deref())?;
        if cartridge_id.is_none() {
            log::debug!(
                "Case lot '{}' references unknown cartridge '{}'",
                record.id,
                record.cartridge_name.as_deref().unwrap_or("")
            );
        }
        Ok(CartridgeLot {
            id: 0,
            cartridge_id,
            lot_number: record.id.clone(),
            quantity: record.quantity,
            times_fired: Some(record.times_fired),
            annealed: Some(record.annealed),
            notes: None,
        })
    }

    fn merge(entity: &mut CartridgeLot, record: &CaseRecord) {
        entity.quantity = record.quantity;
        entity.times_fired = Some(record.times_fired);
        entity.annealed = Some(record.annealed);
    }

    fn insert(conn: &Connection, entity: &CartridgeLot) -> Result<i64, OperationError> {
        operations::insert_cartridge_lot(conn, entity)
    }

    fn update(conn: &Connection, entity: &CartridgeLot) -> Result<(), OperationError> {
        operations::update_cartridge_lot(conn, entity)
    }

    fn entity_id(entity: &CartridgeLot) -> i64 {
        entity.id
    }
}

// ── Factory Ammo ────────────────────────────────────────────────────────────

/// Key: Id as SKU. The manufacturer is stubbed if unknown; cartridge and
/// projectile are matched by name only and left null if unknown.
pub struct FactoryAmmoRules;

impl ImportRules for FactoryAmmoRules {
    const ENTITY_TYPE: EntityType = EntityType::FactoryAmmo;
    type Record = FactoryAmmoRecord;
    type Entity = FactoryAmmo;

    fn external_id(record: &FactoryAmmoRecord) -> &str {
        &record.id
    }

    fn find_existing(
        conn: &Connection,
        record: &FactoryAmmoRecord,
    ) -> Result<Option<FactoryAmmo>, ImportError> {
        Ok(operations::find_factory_ammo_by_sku(conn, &record.id)?)
    }

    fn map_new(conn: &Connection, record: &FactoryAmmoRecord) -> Result<FactoryAmmo, ImportError> {
        let manufacturer_id = find_or_stub_manufacturer(conn, &record.manufacturer)?;
        let cartridge_id = find_cartridge_id(conn, record.cartridge.as_deref())?;
        let projectile_id = match record.projectile.as_deref() {
            Some(name) => operations::find_projectile_by_name(conn, name)?.map(|p| p.id),
            None => None,
        };

        Ok(FactoryAmmo {
            id: 0,
            manufacturer_id,
            cartridge_id,
            projectile_id,
            bullet_weight_grains: record.bullet_weight,
            advertised_velocity_fps: record.velocity,
            advertised_energy_ft_lbs: record.energy,
            test_barrel_length_inches: None,
            sku: record.id.clone(),
            upc: None,
            notes: None,
        })
    }

    fn merge(entity: &mut FactoryAmmo, record: &FactoryAmmoRecord) {
        entity.bullet_weight_grains = record.bullet_weight;
        entity.advertised_velocity_fps = record.velocity;
        entity.advertised_energy_ft_lbs = record.energy;
    }

    fn insert(conn: &Connection, entity: &FactoryAmmo) -> Result<i64, OperationError> {
        operations::insert_factory_ammo(conn, entity)
    }

    fn update(conn: &Connection, entity: &FactoryAmmo) -> Result<(), OperationError> {
        operations::update_factory_ammo(conn, entity)
    }

    fn entity_id(entity: &FactoryAmmo) -> i64 {
        entity.id
    }
}
