use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use chamber_import::{
    FailurePolicy, GRT_STEPS, ImportOptions, ImportProgress, LogProgress, SilentProgress,
    import_all,
};

use crate::CliError;
use crate::settings::resolve_db_path;

/// Import every GRT export in `folder` into the catalog database.
pub(crate) fn run_import(
    folder: PathBuf,
    db_path: Option<PathBuf>,
    keep_going: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if !folder.is_dir() {
        return Err(CliError::other(format!(
            "Import folder not found: {}",
            folder.display()
        )));
    }

    let db_path = resolve_db_path(db_path);
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = chamber_db::open_database(&db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            db_path.display(),
            e
        ))
    })?;

    log::info!(
        "{}",
        format!(
            "Importing GRT exports from {} into {}",
            folder.display(),
            db_path.display()
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );

    let options = ImportOptions {
        failure_policy: if keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        },
    };

    // Spinner only on a terminal; piped output gets plain log lines
    let spinner = (!quiet && std::io::stderr().is_terminal()).then(CliImportProgress::new);
    let reporter: &dyn ImportProgress = match &spinner {
        Some(p) => p,
        None if quiet => &SilentProgress,
        None => &LogProgress,
    };
    let result = import_all(&conn, &folder, &options, Some(reporter));
    if let Some(p) = &spinner {
        p.finish();
    }
    let summary = result?;

    for failure in &summary.failures {
        log::warn!(
            "  {} {} ({}): {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            failure.entity_type.if_supports_color(Stdout, |t| t.bold()),
            failure.path.display(),
            failure.error,
        );
    }

    log::info!("");
    log::info!(
        "{}",
        "Import complete".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Records: {} new, {} merged",
        summary.created(),
        summary.merged(),
    );
    if summary.skipped() > 0 {
        log::info!("  Files not found: {}", summary.skipped());
    }
    log::info!("  Database: {}", db_path.display());

    if !summary.failures.is_empty() {
        return Err(CliError::other(format!(
            "{} of {} import steps failed",
            summary.failures.len(),
            GRT_STEPS.len()
        )));
    }
    Ok(())
}

/// CLI progress reporter: a spinner showing the running count, with phase
/// and completion messages logged above it.
struct CliImportProgress {
    spinner: ProgressBar,
}

impl CliImportProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.disable_steady_tick();
        self.spinner.finish_and_clear();
    }
}

impl ImportProgress for CliImportProgress {
    fn on_phase(&self, message: &str) {
        self.spinner.suspend(|| log::info!("{}", message));
        self.spinner.set_message(message.to_string());
    }

    fn on_tick(&self, _processed: usize, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.spinner.suspend(|| {
            log::info!(
                "  {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                message,
            )
        });
        self.spinner.set_message("");
    }
}
