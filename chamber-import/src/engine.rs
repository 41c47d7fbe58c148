//! Generic find-or-create-or-merge import of one GRT export file.
//!
//! Each entity type plugs in through [`ImportRules`]; [`import_file`] owns the
//! shared loop: load, match by business key, create or merge, record
//! provenance, then commit the whole file at once.

use std::path::{Path, PathBuf};

use chamber_catalog::types::{EntityType, ExternalSourceMap, ImportLog};
use chamber_db::operations::{self, OperationError};
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::progress::ImportProgress;

/// Source name stamped on every provenance row written by this importer.
pub const SOURCE_NAME: &str = "GRT";

/// A tick is reported after every this many records.
pub const PROGRESS_INTERVAL: usize = 100;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to serialize {entity_type} record '{source_id}': {source}")]
    Serialize {
        entity_type: EntityType,
        source_id: String,
        source: serde_json::Error,
    },
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Per-entity mapping rules plugged into [`import_file`].
///
/// Implementors are unit structs; every hook is an associated function so the
/// engine is monomorphized per entity type.
pub trait ImportRules {
    /// Tag written to provenance rows and progress messages.
    const ENTITY_TYPE: EntityType;

    /// One element of the export file's top-level JSON array.
    type Record: DeserializeOwned + Serialize;
    type Entity;

    /// The exporter's id for a record, stored as the provenance `source_id`.
    fn external_id(record: &Self::Record) -> &str;

    /// Look up an existing entity by business key.
    fn find_existing(
        conn: &Connection,
        record: &Self::Record,
    ) -> Result<Option<Self::Entity>, ImportError>;

    /// Build a new entity, resolving (or stub-creating) referenced rows.
    fn map_new(conn: &Connection, record: &Self::Record) -> Result<Self::Entity, ImportError>;

    /// Overwrite the mutable fields of a matched entity. Key fields stay untouched.
    fn merge(entity: &mut Self::Entity, record: &Self::Record);

    fn insert(conn: &Connection, entity: &Self::Entity) -> Result<i64, OperationError>;

    fn update(conn: &Connection, entity: &Self::Entity) -> Result<(), OperationError>;

    fn entity_id(entity: &Self::Entity) -> i64;
}

/// Statistics from importing one file.
#[derive(Debug, Clone)]
pub struct ImportStats {
    pub entity_type: EntityType,
    pub path: PathBuf,
    /// The file did not exist; nothing was read or written.
    pub skipped: bool,
    pub total: u64,
    pub created: u64,
    pub merged: u64,
}

impl ImportStats {
    fn new(entity_type: EntityType, path: &Path) -> Self {
        Self {
            entity_type,
            path: path.to_path_buf(),
            skipped: false,
            total: 0,
            created: 0,
            merged: 0,
        }
    }
}

/// Import a GRT export file using the rules of `R`.
///
/// A missing file is reported through `progress` and returns skipped stats.
/// A file that fails to parse is rejected before anything is written. All
/// records of one file are committed in a single transaction, so an error
/// part-way through leaves the store as it was before the call.
pub fn import_file<R: ImportRules>(
    conn: &Connection,
    path: &Path,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let mut stats = ImportStats::new(R::ENTITY_TYPE, path);

    if !path.exists() {
        stats.skipped = true;
        if let Some(p) = progress {
            p.on_phase(&format!("Skipping {} (not found)", path.display()));
        }
        return Ok(stats);
    }

    if let Some(p) = progress {
        p.on_phase(&format!("Loading {}...", path.display()));
    }

    let records = load_records::<R::Record>(path)?;
    log::debug!(
        "Parsed {} {} records from {}",
        records.len(),
        R::ENTITY_TYPE,
        path.display()
    );

    let tx = conn.unchecked_transaction()?;

    for record in &records {
        import_record::<R>(&tx, record, &mut stats)?;

        let processed = stats.total as usize;
        if processed % PROGRESS_INTERVAL == 0 {
            if let Some(p) = progress {
                p.on_tick(
                    processed,
                    &format!("{} {} processed...", processed, R::ENTITY_TYPE),
                );
            }
        }
    }

    tx.commit()?;

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Finished importing {} ({} items)",
            R::ENTITY_TYPE,
            stats.total
        ));
    }

    Ok(stats)
}

/// Read and parse a whole export file. No partial recovery on bad JSON.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ImportError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| ImportError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Match, create or merge one record, then append its provenance row.
fn import_record<R: ImportRules>(
    conn: &Connection,
    record: &R::Record,
    stats: &mut ImportStats,
) -> Result<(), ImportError> {
    stats.total += 1;

    let entity_id = match R::find_existing(conn, record)? {
        Some(mut entity) => {
            R::merge(&mut entity, record);
            R::update(conn, &entity)?;
            stats.merged += 1;
            R::entity_id(&entity)
        }
        None => {
            let entity = R::map_new(conn, record)?;
            let id = R::insert(conn, &entity)?;
            stats.created += 1;
            id
        }
    };

    let source_id = R::external_id(record);
    let raw_json = serde_json::to_string(record).map_err(|e| ImportError::Serialize {
        entity_type: R::ENTITY_TYPE,
        source_id: source_id.to_string(),
        source: e,
    })?;

    operations::insert_source_map(
        conn,
        &ExternalSourceMap {
            id: 0,
            entity_type: R::ENTITY_TYPE.as_str().to_string(),
            entity_id,
            source_name: SOURCE_NAME.to_string(),
            source_id: source_id.to_string(),
            raw_json: Some(raw_json),
        },
    )?;

    Ok(())
}

/// Record a completed import step in the import_log table.
pub fn log_import(conn: &Connection, stats: &ImportStats) -> Result<i64, ImportError> {
    let entry = ImportLog {
        id: 0,
        source_name: SOURCE_NAME.to_string(),
        entity_type: stats.entity_type.as_str().to_string(),
        file_path: stats.path.display().to_string(),
        imported_at: chrono::Utc::now().to_rfc3339(),
        records_created: stats.created as i64,
        records_merged: stats.merged as i64,
        provenance_rows: stats.total as i64,
    };
    let id = operations::insert_import_log(conn, &entry)?;
    Ok(id)
}
