//! Import GRT JSON exports into the reloading catalog database.
//!
//! This crate owns the reconciliation logic: parsing export records, matching
//! them against existing rows by business key, creating or merging entities,
//! and recording provenance for every record seen.

pub mod engine;
pub mod grt;
pub mod progress;
pub mod records;
pub mod rules;

pub use engine::{
    ImportError, ImportRules, ImportStats, PROGRESS_INTERVAL, SOURCE_NAME, import_file,
    load_records, log_import,
};
pub use grt::{
    FailurePolicy, GRT_STEPS, GrtImportSummary, ImportOptions, ImportStep, StepFailure,
    import_all,
};
pub use progress::{ImportProgress, LogProgress, RecordingProgress, SilentProgress};
pub use records::{
    CartridgeRecord, CaseRecord, FactoryAmmoRecord, PowderRecord, PrimerRecord, ProjectileRecord,
};
pub use rules::{
    CartridgeRules, CaseRules, FactoryAmmoRules, PowderRules, PrimerRules, ProjectileRules,
    find_or_stub_manufacturer,
};
