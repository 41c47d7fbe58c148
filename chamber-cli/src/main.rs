//! chamber CLI
//!
//! Command-line interface for importing GRT reloading-data exports into a
//! local catalog database and inspecting what was imported.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Import {
            folder,
            db,
            keep_going,
        } => commands::import::run_import(folder, db, keep_going, cli.quiet),
        Commands::Stats { db } => commands::stats::run_stats(db),
        Commands::Provenance {
            entity_type,
            id,
            db,
        } => commands::provenance::run_provenance(&entity_type, id, db),
        Commands::History { db, limit } => commands::history::run_history(db, limit),
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Show => {
                commands::config::run_config_show();
                Ok(())
            }
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(path),
        },
    }
}

/// Configure `env_logger` for terminal output.
///
/// Normal mode prints bare messages at info level (or whatever `RUST_LOG`
/// asks for). `--verbose` adds timestamps and levels and enables debug
/// output. `--quiet` keeps only warnings and errors.
fn init_logging(quiet: bool, verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if verbose {
        builder.filter_level(LevelFilter::Debug);
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        });
    } else {
        if quiet {
            builder.filter_level(LevelFilter::Warn);
        }
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    builder.init();
}
