//! Whole-folder GRT import.
//!
//! Runs one [`import_file`] step per entity type in [`GRT_STEPS`] order.

use std::path::{Path, PathBuf};

use chamber_catalog::types::EntityType;
use rusqlite::Connection;

use crate::engine::{ImportError, ImportStats, import_file, log_import};
use crate::progress::ImportProgress;
use crate::rules::*;

type StepFn = fn(&Connection, &Path, Option<&dyn ImportProgress>) -> Result<ImportStats, ImportError>;

/// One entry of the import sequence: which file feeds which rules.
pub struct ImportStep {
    pub entity_type: EntityType,
    pub file_name: &'static str,
    run: StepFn,
}

impl ImportStep {
    pub fn run(
        &self,
        conn: &Connection,
        path: &Path,
        progress: Option<&dyn ImportProgress>,
    ) -> Result<ImportStats, ImportError> {
        (self.run)(conn, path, progress)
    }
}

/// Import order. Factory ammo goes last because it resolves manufacturer,
/// cartridge and projectile by name; case lots resolve cartridges, so they
/// follow cartridges.
pub const GRT_STEPS: [ImportStep; 6] = [
    ImportStep {
        entity_type: EntityType::Projectile,
        file_name: "projectiles.json",
        run: import_file::<ProjectileRules>,
    },
    ImportStep {
        entity_type: EntityType::Cartridge,
        file_name: "cartridges.json",
        run: import_file::<CartridgeRules>,
    },
    ImportStep {
        entity_type: EntityType::Powder,
        file_name: "powders.json",
        run: import_file::<PowderRules>,
    },
    ImportStep {
        entity_type: EntityType::Primer,
        file_name: "primers.json",
        run: import_file::<PrimerRules>,
    },
    ImportStep {
        entity_type: EntityType::CartridgeLot,
        file_name: "cases.json",
        run: import_file::<CaseRules>,
    },
    ImportStep {
        entity_type: EntityType::FactoryAmmo,
        file_name: "factory_ammo.json",
        run: import_file::<FactoryAmmoRules>,
    },
];

/// What to do when a step fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing step and return its error. Steps that
    /// already finished stay committed.
    #[default]
    Abort,
    /// Record the failure and run the remaining steps.
    Continue,
}

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub failure_policy: FailurePolicy,
}

/// A step that failed under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct StepFailure {
    pub entity_type: EntityType,
    pub path: PathBuf,
    pub error: ImportError,
}

/// Outcome of [`import_all`].
#[derive(Debug, Default)]
pub struct GrtImportSummary {
    /// Stats of every step that ran to completion, including skipped ones.
    pub steps: Vec<ImportStats>,
    pub failures: Vec<StepFailure>,
}

impl GrtImportSummary {
    pub fn created(&self) -> u64 {
        self.steps.iter().map(|s| s.created).sum()
    }

    pub fn merged(&self) -> u64 {
        self.steps.iter().map(|s| s.merged).sum()
    }

    pub fn skipped(&self) -> usize {
        self.steps.iter().filter(|s| s.skipped).count()
    }
}

/// Import every GRT export found in `folder`.
///
/// Missing files are skipped. Under [`FailurePolicy::Abort`] the first step
/// error is returned and later steps do not run.
pub fn import_all(
    conn: &Connection,
    folder: &Path,
    options: &ImportOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<GrtImportSummary, ImportError> {
    let mut summary = GrtImportSummary::default();

    for step in &GRT_STEPS {
        let path = folder.join(step.file_name);
        match run_step(conn, step, &path, progress) {
            Ok(stats) => summary.steps.push(stats),
            Err(e) => match options.failure_policy {
                FailurePolicy::Abort => return Err(e),
                FailurePolicy::Continue => {
                    log::warn!("{} import failed: {}", step.entity_type, e);
                    summary.failures.push(StepFailure {
                        entity_type: step.entity_type,
                        path,
                        error: e,
                    });
                }
            },
        }
    }

    Ok(summary)
}

fn run_step(
    conn: &Connection,
    step: &ImportStep,
    path: &Path,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let stats = step.run(conn, path, progress)?;
    // The step is already committed; a missing history row must not undo it
    if !stats.skipped {
        if let Err(e) = log_import(conn, &stats) {
            log::warn!("Failed to log {} import: {}", step.entity_type, e);
        }
    }
    Ok(stats)
}
