use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::backend::Backend;

pub(crate) fn run_stats(backend: &Backend) -> Result<(), CliError> {
    let Some((store, path)) = &backend.sqlite else {
        log::warn!("Statistics are only kept for the SQLite backend.");
        return Ok(());
    };

    let stats = store
        .stats()
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", path.display());
    crate::log_blank();
    log::info!("  Films:          {:>8}", stats.films);
    log::info!("  Users:          {:>8}", stats.users);
    log::info!("  Directors:      {:>8}", stats.directors);
    log::info!("  Genres:         {:>8}", stats.genres);
    log::info!("  Ratings:        {:>8}", stats.ratings);
    log::info!("  Likes:          {:>8}", stats.likes);
    log::info!(
        "  Friendships:    {:>8} (directed edges)",
        stats.friendships,
    );

    Ok(())
}
