use std::path::Path;

use chamber_catalog::types::EntityType;
use chamber_db::*;
use chamber_import::*;

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

fn full_export(dir: &Path) {
    write(
        dir,
        "projectiles.json",
        r#"[{"Id":"P1","Manufacturer":"Hornady","Name":"ELD-X","Caliber":".308","Diameter":0.308,"Weight":178,"Type":"BTHP","BC_G1":0.552,"BC_G7":0.280,"SD":0.268}]"#,
    );
    write(
        dir,
        "cartridges.json",
        r#"[{"Id":"C1","Name":".308 Winchester","CaseLength":2.015,"OverallLength":2.8,"MaxPressurePsi":62000,"PrimerType":"Large Rifle"}]"#,
    );
    write(
        dir,
        "powders.json",
        r#"[{"Id":"W1","Manufacturer":"Hodgdon","Name":"Varget","Type":"Extruded","BurnRate":88}]"#,
    );
    write(
        dir,
        "primers.json",
        r#"[{"Id":"R1","Manufacturer":"Federal","Name":"210M","Type":"Large Rifle"}]"#,
    );
    write(
        dir,
        "cases.json",
        r#"[{"Id":"L1","CartridgeName":".308 Winchester","Quantity":100,"TimesFired":1,"Annealed":false}]"#,
    );
    write(
        dir,
        "factory_ammo.json",
        r#"[{"Id":"80993","Manufacturer":"Hornady","Cartridge":".308 Winchester","Projectile":"ELD-X","BulletWeight":178,"Velocity":2600,"Energy":2672}]"#,
    );
}

#[test]
fn steps_run_in_dependency_order() {
    let order: Vec<(EntityType, &str)> = GRT_STEPS
        .iter()
        .map(|s| (s.entity_type, s.file_name))
        .collect();
    assert_eq!(
        order,
        vec![
            (EntityType::Projectile, "projectiles.json"),
            (EntityType::Cartridge, "cartridges.json"),
            (EntityType::Powder, "powders.json"),
            (EntityType::Primer, "primers.json"),
            (EntityType::CartridgeLot, "cases.json"),
            (EntityType::FactoryAmmo, "factory_ammo.json"),
        ]
    );
}

#[test]
fn import_all_populates_every_table() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    full_export(dir.path());

    let summary = import_all(&conn, dir.path(), &ImportOptions::default(), None).unwrap();
    assert_eq!(summary.steps.len(), 6);
    assert_eq!(summary.created(), 6);
    assert_eq!(summary.skipped(), 0);
    assert!(summary.failures.is_empty());

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.manufacturers, 1);
    assert_eq!(stats.projectiles, 1);
    assert_eq!(stats.cartridges, 1);
    assert_eq!(stats.powders, 1);
    assert_eq!(stats.primers, 1);
    assert_eq!(stats.cartridge_lots, 1);
    assert_eq!(stats.factory_ammo, 1);
    assert_eq!(stats.provenance_rows, 6);
    assert_eq!(stats.imports, 6);

    // Factory ammo saw the rows committed by earlier steps
    let ammo = find_factory_ammo_by_sku(&conn, "80993").unwrap().unwrap();
    assert!(ammo.cartridge_id.is_some());
    assert!(ammo.projectile_id.is_some());
    let lot = find_cartridge_lot(&conn, ".308 Winchester", "L1").unwrap();
    assert!(lot.is_some());
}

#[test]
fn running_twice_merges_everything() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    full_export(dir.path());

    import_all(&conn, dir.path(), &ImportOptions::default(), None).unwrap();
    let second = import_all(&conn, dir.path(), &ImportOptions::default(), None).unwrap();
    assert_eq!(second.created(), 0);
    assert_eq!(second.merged(), 6);

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.projectiles, 1);
    assert_eq!(stats.factory_ammo, 1);
    assert_eq!(stats.provenance_rows, 12);
}

#[test]
fn missing_files_do_not_stop_later_steps() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "factory_ammo.json",
        r#"[{"Id":"S1","Manufacturer":"Federal","Cartridge":"x","Projectile":"y","BulletWeight":55}]"#,
    );
    let progress = RecordingProgress::new();

    let summary =
        import_all(&conn, dir.path(), &ImportOptions::default(), Some(&progress)).unwrap();
    assert_eq!(summary.steps.len(), 6);
    assert_eq!(summary.skipped(), 5);
    assert_eq!(catalog_stats(&conn).unwrap().factory_ammo, 1);
    // Skipped steps are not logged
    assert_eq!(list_import_logs(&conn, None).unwrap().len(), 1);

    let messages = progress.messages();
    let skips = messages.iter().filter(|m| m.starts_with("Skipping")).count();
    assert_eq!(skips, 5);
    assert_eq!(
        messages.last().map(String::as_str),
        Some("Finished importing FactoryAmmo (1 items)")
    );
}

#[test]
fn empty_folder_is_not_an_error() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let summary = import_all(&conn, dir.path(), &ImportOptions::default(), None).unwrap();
    assert_eq!(summary.skipped(), 6);
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}

#[test]
fn abort_policy_stops_at_first_failure() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    full_export(dir.path());
    write(dir.path(), "powders.json", "not json");

    let err = import_all(&conn, dir.path(), &ImportOptions::default(), None).unwrap_err();
    assert!(matches!(err, ImportError::Parse { .. }));

    let stats = catalog_stats(&conn).unwrap();
    // Steps before the failure stay committed
    assert_eq!(stats.projectiles, 1);
    assert_eq!(stats.cartridges, 1);
    // The failing step and everything after it did not run
    assert_eq!(stats.powders, 0);
    assert_eq!(stats.primers, 0);
    assert_eq!(stats.factory_ammo, 0);
}

#[test]
fn continue_policy_runs_remaining_steps() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    full_export(dir.path());
    write(dir.path(), "powders.json", "not json");

    let options = ImportOptions {
        failure_policy: FailurePolicy::Continue,
    };
    let summary = import_all(&conn, dir.path(), &options, None).unwrap();
    assert_eq!(summary.steps.len(), 5);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].entity_type, EntityType::Powder);
    assert!(summary.failures[0].path.ends_with("powders.json"));

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.powders, 0);
    assert_eq!(stats.primers, 1);
    assert_eq!(stats.factory_ammo, 1);
}

#[test]
fn import_log_failure_keeps_committed_step() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_log BEFORE INSERT ON import_log
         BEGIN SELECT RAISE(ABORT, 'read-only history'); END;",
    )
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    full_export(dir.path());

    let summary = import_all(&conn, dir.path(), &ImportOptions::default(), None).unwrap();
    assert_eq!(summary.steps.len(), 6);
    assert_eq!(summary.created(), 6);
    assert!(summary.failures.is_empty());

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.factory_ammo, 1);
    assert_eq!(stats.imports, 0);
}
