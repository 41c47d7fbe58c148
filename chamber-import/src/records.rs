//! GRT export record shapes.
//!
//! Field names follow the exporter's JSON exactly. Every struct uses
//! `#[serde(default)]`, so a missing field reads as empty/zero/`None` instead
//! of failing the whole file. The same derives re-serialize a record for the
//! provenance `raw_json` column.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProjectileRecord {
    pub id: String,
    pub manufacturer: String,
    pub name: String,
    pub caliber: String,
    pub diameter: f64,
    pub weight: f64,
    #[serde(rename = "Type")]
    pub projectile_type: Option<String>,
    #[serde(rename = "BC_G1")]
    pub bc_g1: Option<f64>,
    #[serde(rename = "BC_G7")]
    pub bc_g7: Option<f64>,
    #[serde(rename = "SD")]
    pub sd: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CartridgeRecord {
    pub id: String,
    pub name: String,
    pub parent_case: Option<String>,
    pub case_length: f64,
    pub overall_length: f64,
    pub rim_diameter: f64,
    pub base_diameter: f64,
    pub neck_diameter: f64,
    pub shoulder_angle: Option<f64>,
    pub max_pressure_psi: i64,
    pub primer_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PowderRecord {
    pub id: String,
    pub manufacturer: String,
    pub name: String,
    #[serde(rename = "Type")]
    pub powder_type: Option<String>,
    pub burn_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PrimerRecord {
    pub id: String,
    pub manufacturer: String,
    pub name: String,
    /// Small Pistol, Large Rifle, etc.
    #[serde(rename = "Type")]
    pub primer_type: Option<String>,
}

/// A batch of cases. GRT calls these "cases"; `Id` is the lot number.
/// `CartridgeName` may be null or absent, leaving the lot unlinked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CaseRecord {
    pub id: String,
    pub cartridge_name: Option<String>,
    pub quantity: i64,
    pub times_fired: i64,
    pub annealed: bool,
}

/// `Id` is the product SKU. The other references are by display name;
/// cartridge and projectile may be null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FactoryAmmoRecord {
    pub id: String,
    pub manufacturer: String,
    pub cartridge: Option<String>,
    pub projectile: Option<String>,
    pub bullet_weight: f64,
    pub velocity: Option<i64>,
    pub energy: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projectile_record_reads_grt_field_names() {
        let json = r#"{"Id":"P1","Manufacturer":"Hornady","Name":"ELD-X","Caliber":".308",
            "Diameter":0.308,"Weight":178,"Type":"BTHP","BC_G1":0.552,"BC_G7":0.280,"SD":0.268}"#;
        let rec: ProjectileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, "P1");
        assert_eq!(rec.weight, 178.0);
        assert_eq!(rec.projectile_type.as_deref(), Some("BTHP"));
        assert_eq!(rec.bc_g1, Some(0.552));
        assert_eq!(rec.sd, Some(0.268));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let rec: CaseRecord = serde_json::from_str(r#"{"Id":"L1"}"#).unwrap();
        assert_eq!(rec.id, "L1");
        assert_eq!(rec.cartridge_name, None);
        assert_eq!(rec.quantity, 0);
        assert!(!rec.annealed);
    }

    #[test]
    fn null_references_read_as_none() {
        let rec: FactoryAmmoRecord = serde_json::from_str(
            r#"{"Id":"S1","Manufacturer":"Federal","Cartridge":null,"Projectile":null}"#,
        )
        .unwrap();
        assert_eq!(rec.cartridge, None);
        assert_eq!(rec.projectile, None);

        let rec: CaseRecord =
            serde_json::from_str(r#"{"Id":"L1","CartridgeName":null}"#).unwrap();
        assert_eq!(rec.cartridge_name, None);
    }

    #[test]
    fn serializes_back_to_grt_field_names() {
        let rec = PowderRecord {
            id: "W1".to_string(),
            manufacturer: "Hodgdon".to_string(),
            name: "H4350".to_string(),
            powder_type: Some("Extruded".to_string()),
            burn_rate: None,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains(r#""Type":"Extruded""#));
        assert!(json.contains(r#""BurnRate":null"#));
        assert!(json.contains(r#""Id":"W1""#));
    }
}
