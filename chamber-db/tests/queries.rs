use chamber_catalog::types::*;
use chamber_db::*;

#[test]
fn stats_on_empty_database() {
    let conn = open_memory().unwrap();
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}

#[test]
fn list_manufacturers_sorted_by_name() {
    let conn = open_memory().unwrap();
    for name in ["Sierra", "Berger", "Hornady"] {
        insert_manufacturer(&conn, &Manufacturer::stub(name)).unwrap();
    }

    let names: Vec<String> = list_manufacturers(&conn)
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["Berger", "Hornady", "Sierra"]);
}

#[test]
fn projectiles_for_manufacturer_filters() {
    let conn = open_memory().unwrap();
    let hornady = insert_manufacturer(&conn, &Manufacturer::stub("Hornady")).unwrap();
    let sierra = insert_manufacturer(&conn, &Manufacturer::stub("Sierra")).unwrap();
    for (m, name) in [(hornady, "ELD-X"), (hornady, "A-Tip"), (sierra, "MatchKing")] {
        insert_projectile(
            &conn,
            &Projectile {
                manufacturer_id: m,
                name: name.to_string(),
                caliber: ".308".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    }

    let names: Vec<String> = projectiles_for_manufacturer(&conn, hornady)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["A-Tip", "ELD-X"]);
}

#[test]
fn get_by_id_returns_none_when_absent() {
    let conn = open_memory().unwrap();
    assert!(get_manufacturer(&conn, 1).unwrap().is_none());
    assert!(get_projectile(&conn, 1).unwrap().is_none());
    assert!(get_cartridge(&conn, 1).unwrap().is_none());
    assert!(get_cartridge_lot(&conn, 1).unwrap().is_none());
    assert!(get_factory_ammo(&conn, 1).unwrap().is_none());
}

#[test]
fn import_logs_newest_first() {
    let conn = open_memory().unwrap();
    for entity_type in ["Projectile", "Cartridge", "Powder"] {
        insert_import_log(
            &conn,
            &ImportLog {
                id: 0,
                source_name: "GRT".to_string(),
                entity_type: entity_type.to_string(),
                file_path: "x.json".to_string(),
                imported_at: "2026-01-01T00:00:00+00:00".to_string(),
                records_created: 1,
                records_merged: 0,
                provenance_rows: 1,
            },
        )
        .unwrap();
    }

    let logs = list_import_logs(&conn, Some(2)).unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].entity_type, "Powder");
    assert_eq!(logs[1].entity_type, "Cartridge");
}
