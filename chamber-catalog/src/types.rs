//! Data model types for the reloading catalog.
//!
//! These types represent the persistent catalog schema: manufacturers,
//! components (projectiles, cartridges, powders, primers), lots, firearms,
//! factory ammunition, and import provenance.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Entity Type Tags ────────────────────────────────────────────────────────

/// Tag stored in provenance rows to identify which table `entity_id` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Manufacturer,
    Projectile,
    Cartridge,
    Powder,
    Primer,
    CartridgeLot,
    FactoryAmmo,
    Firearm,
    AmmoLot,
}

impl EntityType {
    pub const ALL: [EntityType; 9] = [
        Self::Manufacturer,
        Self::Projectile,
        Self::Cartridge,
        Self::Powder,
        Self::Primer,
        Self::CartridgeLot,
        Self::FactoryAmmo,
        Self::Firearm,
        Self::AmmoLot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manufacturer => "Manufacturer",
            Self::Projectile => "Projectile",
            Self::Cartridge => "Cartridge",
            Self::Powder => "Powder",
            Self::Primer => "Primer",
            Self::CartridgeLot => "CartridgeLot",
            Self::FactoryAmmo => "FactoryAmmo",
            Self::Firearm => "Firearm",
            Self::AmmoLot => "AmmoLot",
        }
    }

    /// Parse a tag, accepting any case and the `case`/`cases` alias for lots.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let lower = s.to_lowercase().replace(['-', '_'], "");
        let found = match lower.as_str() {
            "manufacturer" | "manufacturers" => Self::Manufacturer,
            "projectile" | "projectiles" | "bullet" => Self::Projectile,
            "cartridge" | "cartridges" => Self::Cartridge,
            "powder" | "powders" => Self::Powder,
            "primer" | "primers" => Self::Primer,
            "cartridgelot" | "case" | "cases" => Self::CartridgeLot,
            "factoryammo" | "ammo" => Self::FactoryAmmo,
            "firearm" | "firearms" => Self::Firearm,
            "ammolot" => Self::AmmoLot,
            _ => return None,
        };
        Some(found)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Manufacturer ────────────────────────────────────────────────────────────

/// A component or ammunition maker. `name` is the business key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
    pub country: Option<String>,
    pub website: Option<String>,
}

impl Manufacturer {
    /// A name-only manufacturer, created when an import references an unknown maker.
    pub fn stub(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

// ── Components ──────────────────────────────────────────────────────────────

/// A bullet. Keyed by (name, manufacturer name).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projectile {
    pub id: i64,
    pub manufacturer_id: i64,
    pub name: String,
    pub caliber: String,
    pub diameter: f64,
    pub weight_grains: f64,
    pub projectile_type: Option<String>,
    pub ballistic_coefficient_g1: Option<f64>,
    pub ballistic_coefficient_g7: Option<f64>,
    pub sectional_density: Option<f64>,
    pub notes: Option<String>,
}

/// A cartridge design such as "9mm Luger" or "6.5 Creedmoor". Keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cartridge {
    pub id: i64,
    pub name: String,
    pub parent_case: Option<String>,
    pub case_length: f64,
    pub overall_length: f64,
    pub rim_diameter: f64,
    pub base_diameter: f64,
    pub neck_diameter: f64,
    pub shoulder_angle: Option<f64>,
    pub max_pressure_psi: i64,
    /// "Small Pistol", "Large Rifle", etc.
    pub primer_type: Option<String>,
    pub notes: Option<String>,
}

/// Keyed by (name, manufacturer). The manufacturer is a plain string, not a reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Powder {
    pub id: i64,
    pub manufacturer: String,
    pub name: String,
    /// Extruded, Ball, Flake.
    pub powder_type: Option<String>,
    pub burn_rate_rank: Option<f64>,
    pub notes: Option<String>,
}

/// Keyed by (name, manufacturer). The manufacturer is a plain string, not a reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Primer {
    pub id: i64,
    pub manufacturer: String,
    pub name: String,
    pub primer_type: Option<String>,
    pub notes: Option<String>,
}

// ── Lots ────────────────────────────────────────────────────────────────────

/// A batch of brass cases for one cartridge. Keyed by (cartridge name, lot number).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartridgeLot {
    pub id: i64,
    pub cartridge_id: Option<i64>,
    pub lot_number: String,
    pub quantity: i64,
    pub times_fired: Option<i64>,
    pub annealed: Option<bool>,
    pub notes: Option<String>,
}

/// A batch of hand-loaded rounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmmoLot {
    pub id: i64,
    pub cartridge_id: i64,
    pub projectile_id: i64,
    pub powder_id: Option<i64>,
    pub powder_charge_grains: Option<f64>,
    pub cartridge_overall_length: Option<f64>,
    pub quantity: i64,
    pub lot_number: Option<String>,
    /// Empty on insert means "now".
    pub date_loaded: String,
    pub notes: Option<String>,
}

// ── Factory Ammunition ──────────────────────────────────────────────────────

/// A commercially loaded product. Keyed by SKU.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactoryAmmo {
    pub id: i64,
    pub manufacturer_id: i64,
    pub cartridge_id: Option<i64>,
    pub projectile_id: Option<i64>,
    pub bullet_weight_grains: f64,
    pub advertised_velocity_fps: Option<i64>,
    pub advertised_energy_ft_lbs: Option<i64>,
    pub test_barrel_length_inches: Option<f64>,
    pub sku: String,
    pub upc: Option<String>,
    pub notes: Option<String>,
}

// ── Firearms ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Firearm {
    pub id: i64,
    pub manufacturer: String,
    pub model: String,
    pub caliber: Option<String>,
    pub barrel_length_inches: f64,
    /// e.g. "1:10"
    pub twist_rate: Option<String>,
    /// Bolt, Semi-auto, Revolver, etc.
    pub action_type: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Links a catalog entity to the external record it was imported from.
///
/// One row is appended per imported record, so re-imports build an audit
/// trail rather than replacing earlier rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalSourceMap {
    pub id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    /// "GRT", "Ammolytics", ...
    pub source_name: String,
    pub source_id: String,
    pub raw_json: Option<String>,
}

/// Log entry for one completed import step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportLog {
    pub id: i64,
    pub source_name: String,
    pub entity_type: String,
    pub file_path: String,
    pub imported_at: String,
    pub records_created: i64,
    pub records_merged: i64,
    pub provenance_rows: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_round_trips_through_tag() {
        for t in EntityType::ALL {
            assert_eq!(EntityType::from_str_loose(t.as_str()), Some(t));
        }
    }

    #[test]
    fn entity_type_accepts_aliases() {
        assert_eq!(EntityType::from_str_loose("cases"), Some(EntityType::CartridgeLot));
        assert_eq!(EntityType::from_str_loose("factory_ammo"), Some(EntityType::FactoryAmmo));
        assert_eq!(EntityType::from_str_loose("widget"), None);
    }

    #[test]
    fn manufacturer_stub_has_only_a_name() {
        let m = Manufacturer::stub("Hornady");
        assert_eq!(m.name, "Hornady");
        assert_eq!(m.id, 0);
        assert!(m.country.is_none());
        assert!(m.website.is_none());
    }
}
