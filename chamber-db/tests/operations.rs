use chamber_catalog::types::*;
use chamber_db::*;

fn hornady(conn: &rusqlite::Connection) -> i64 {
    insert_manufacturer(
        conn,
        &Manufacturer {
            id: 0,
            name: "Hornady".to_string(),
            country: Some("USA".to_string()),
            website: Some("https://www.hornady.com".to_string()),
        },
    )
    .unwrap()
}

fn eld_x(manufacturer_id: i64) -> Projectile {
    Projectile {
        id: 0,
        manufacturer_id,
        name: "ELD-X".to_string(),
        caliber: ".308".to_string(),
        diameter: 0.308,
        weight_grains: 178.0,
        projectile_type: Some("BTHP".to_string()),
        ballistic_coefficient_g1: Some(0.552),
        ballistic_coefficient_g7: Some(0.28),
        sectional_density: Some(0.268),
        notes: Some("hunting".to_string()),
    }
}

#[test]
fn find_manufacturer_is_case_sensitive() {
    let conn = open_memory().unwrap();
    let id = hornady(&conn);

    let found = find_manufacturer_by_name(&conn, "Hornady").unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.country.as_deref(), Some("USA"));

    assert!(find_manufacturer_by_name(&conn, "hornady").unwrap().is_none());
}

#[test]
fn projectile_found_by_name_and_manufacturer() {
    let conn = open_memory().unwrap();
    let m = hornady(&conn);
    let other = insert_manufacturer(&conn, &Manufacturer::stub("Sierra")).unwrap();
    let id = insert_projectile(&conn, &eld_x(m)).unwrap();

    let found = find_projectile(&conn, "ELD-X", "Hornady").unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.weight_grains, 178.0);
    assert_eq!(found.ballistic_coefficient_g1, Some(0.552));

    assert!(find_projectile(&conn, "ELD-X", "Sierra").unwrap().is_none());
    insert_projectile(&conn, &eld_x(other)).unwrap();
    let sierra = find_projectile(&conn, "ELD-X", "Sierra").unwrap().unwrap();
    assert_ne!(sierra.id, id);

    // Name-only lookup returns the first inserted
    let first = find_projectile_by_name(&conn, "ELD-X").unwrap().unwrap();
    assert_eq!(first.id, id);
}

#[test]
fn update_projectile_only_touches_measurements() {
    let conn = open_memory().unwrap();
    let m = hornady(&conn);
    let id = insert_projectile(&conn, &eld_x(m)).unwrap();

    let mut changed = eld_x(m);
    changed.id = id;
    changed.weight_grains = 180.0;
    changed.name = "Renamed".to_string();
    changed.caliber = ".30".to_string();
    changed.notes = None;
    update_projectile(&conn, &changed).unwrap();

    let stored = get_projectile(&conn, id).unwrap().unwrap();
    assert_eq!(stored.weight_grains, 180.0);
    assert_eq!(stored.name, "ELD-X");
    assert_eq!(stored.caliber, ".308");
    assert_eq!(stored.notes.as_deref(), Some("hunting"));
}

#[test]
fn update_missing_row_is_not_found() {
    let conn = open_memory().unwrap();
    let powder = Powder {
        id: 42,
        manufacturer: "Hodgdon".to_string(),
        name: "H4350".to_string(),
        ..Default::default()
    };
    match update_powder(&conn, &powder) {
        Err(OperationError::NotFound { entity_type, id }) => {
            assert_eq!(entity_type, "powder");
            assert_eq!(id, "42");
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn powder_and_primer_keys_are_literal() {
    let conn = open_memory().unwrap();
    insert_primer(
        &conn,
        &Primer {
            id: 0,
            manufacturer: "CCI".to_string(),
            name: "CCI 450".to_string(),
            primer_type: Some("Small Rifle Magnum".to_string()),
            notes: None,
        },
    )
    .unwrap();
    insert_powder(
        &conn,
        &Powder {
            id: 0,
            manufacturer: "Hodgdon".to_string(),
            name: "H4350".to_string(),
            powder_type: Some("Extruded".to_string()),
            burn_rate_rank: Some(97.0),
            notes: None,
        },
    )
    .unwrap();

    assert!(find_primer(&conn, "CCI 450", "CCI").unwrap().is_some());
    assert!(find_primer(&conn, "CCI 450", "cci").unwrap().is_none());
    assert!(find_powder(&conn, "H4350", "Hodgdon").unwrap().is_some());
    assert!(find_powder(&conn, "h4350", "Hodgdon").unwrap().is_none());
}

#[test]
fn cartridge_lot_lookup_requires_linked_cartridge() {
    let conn = open_memory().unwrap();
    let cartridge_id = insert_cartridge(
        &conn,
        &Cartridge {
            name: "6.5 Creedmoor".to_string(),
            ..Default::default()
        },
    )
    .unwrap();

    let linked = insert_cartridge_lot(
        &conn,
        &CartridgeLot {
            cartridge_id: Some(cartridge_id),
            lot_number: "L1".to_string(),
            quantity: 100,
            ..Default::default()
        },
    )
    .unwrap();
    insert_cartridge_lot(
        &conn,
        &CartridgeLot {
            cartridge_id: None,
            lot_number: "L2".to_string(),
            ..Default::default()
        },
    )
    .unwrap();

    let found = find_cartridge_lot(&conn, "6.5 Creedmoor", "L1").unwrap().unwrap();
    assert_eq!(found.id, linked);
    assert_eq!(found.quantity, 100);
    assert!(find_cartridge_lot(&conn, "6.5 Creedmoor", "L2").unwrap().is_none());
}

#[test]
fn factory_ammo_by_sku() {
    let conn = open_memory().unwrap();
    let m = hornady(&conn);
    let id = insert_factory_ammo(
        &conn,
        &FactoryAmmo {
            manufacturer_id: m,
            sku: "81499".to_string(),
            bullet_weight_grains: 143.0,
            advertised_velocity_fps: Some(2700),
            ..Default::default()
        },
    )
    .unwrap();

    let found = find_factory_ammo_by_sku(&conn, "81499").unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.cartridge_id, None);
    assert_eq!(found.advertised_velocity_fps, Some(2700));
}

#[test]
fn ammo_lot_defaults_date_loaded() {
    let conn = open_memory().unwrap();
    let m = hornady(&conn);
    let cartridge_id = insert_cartridge(
        &conn,
        &Cartridge {
            name: ".308 Winchester".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    let projectile_id = insert_projectile(&conn, &eld_x(m)).unwrap();

    let id = insert_ammo_lot(
        &conn,
        &AmmoLot {
            cartridge_id,
            projectile_id,
            quantity: 50,
            ..Default::default()
        },
    )
    .unwrap();

    let date: String = conn
        .query_row("SELECT date_loaded FROM ammo_lots WHERE id = ?1", [id], |r| {
            r.get(0)
        })
        .unwrap();
    assert!(!date.is_empty());
}

#[test]
fn firearm_insert_counts_in_stats() {
    let conn = open_memory().unwrap();
    insert_firearm(
        &conn,
        &Firearm {
            manufacturer: "Tikka".to_string(),
            model: "T3x".to_string(),
            caliber: Some("6.5 Creedmoor".to_string()),
            barrel_length_inches: 24.0,
            twist_rate: Some("1:8".to_string()),
            action_type: Some("Bolt".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(catalog_stats(&conn).unwrap().firearms, 1);
}

#[test]
fn source_map_rows_append() {
    let conn = open_memory().unwrap();
    let row = ExternalSourceMap {
        id: 0,
        entity_type: "Projectile".to_string(),
        entity_id: 7,
        source_name: "GRT".to_string(),
        source_id: "P1".to_string(),
        raw_json: Some("{}".to_string()),
    };
    insert_source_map(&conn, &row).unwrap();
    insert_source_map(&conn, &row).unwrap();

    let rows = provenance_for_entity(&conn, EntityType::Projectile, 7).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].id < rows[1].id);
    assert_eq!(provenance_by_source(&conn, "GRT", "P1").unwrap().len(), 2);
}
