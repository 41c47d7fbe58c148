//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chamber")]
#[command(about = "Import reloading data exports into a local catalog", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import a folder of GRT JSON exports
    Import {
        /// Folder containing projectiles.json, cartridges.json, etc.
        folder: PathBuf,

        /// Path to the catalog database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Run the remaining files when one fails instead of stopping
        #[arg(long)]
        keep_going: bool,
    },

    /// Show row counts for the catalog database
    Stats {
        /// Path to the catalog database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Show where an entity's data came from
    Provenance {
        /// Entity type (e.g., projectile, cartridge, case, factory-ammo)
        entity_type: String,

        /// Entity id
        id: i64,

        /// Path to the catalog database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// List recent imports
    History {
        /// Path to the catalog database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Maximum number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Show current settings and the resolved database path
    Show,

    /// Set the default database path
    SetDb {
        /// Database file to use when --db is not given
        path: PathBuf,
    },
}
