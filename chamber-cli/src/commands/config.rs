use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::settings;

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}

/// Show the settings file and the database path it resolves to.
pub(crate) fn run_config_show() {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "Chamber Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let source = if settings::read_db_path(&path).is_some() {
        "(settings)"
    } else {
        "(default)"
    };
    log::info!(
        "  Database:      {} {}",
        settings::resolve_db_path(None).display(),
        source.if_supports_color(Stdout, |t| t.dimmed()),
    );

    if let Some(contents) = settings::load_settings_string(&path) {
        log::info!("");
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }
}

/// Save the default database path to the settings file.
pub(crate) fn run_config_set_db(db_path: PathBuf) -> Result<(), CliError> {
    let db_path = if db_path.is_absolute() {
        db_path
    } else {
        std::env::current_dir()?.join(db_path)
    };

    let path = settings::settings_path();
    settings::write_db_path(&path, &db_path).map_err(|e| {
        CliError::config(format!("Failed to write {}: {}", path.display(), e))
    })?;

    log::info!(
        "  {} Default database set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        db_path.display(),
    );
    Ok(())
}
