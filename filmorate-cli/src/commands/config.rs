use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::settings;

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings::settings_path().display());
}

/// Show the settings file and the paths it resolves to.
pub(crate) fn run_config_show(db: Option<PathBuf>, reference: Option<PathBuf>) {
    let path = settings::settings_path();
    log::info!(
        "{}",
        "Filmorate Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

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

    log::info!(
        "  Database:      {}",
        settings::resolve_db_path(db).display()
    );
    match settings::resolve_reference_dir(reference) {
        Some(dir) => log::info!("  Reference:     {}", dir.display()),
        None => log::info!(
            "  Reference:     {}",
            "standard set".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("    {}", line);
        }
    }
}
