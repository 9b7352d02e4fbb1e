use filmorate_service::Services;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::print_json;
use crate::CliError;

pub(crate) fn run_genres(svc: &Services, json: bool) -> Result<(), CliError> {
    let genres = svc.reference.genres()?;
    if json {
        return print_json(&genres);
    }
    log::info!("{}", "Genres".if_supports_color(Stdout, |t| t.bold()));
    for genre in &genres {
        log::info!("  {:>3}  {}", genre.id, genre.name);
    }
    Ok(())
}

pub(crate) fn run_ratings(svc: &Services, json: bool) -> Result<(), CliError> {
    let ratings = svc.reference.ratings()?;
    if json {
        return print_json(&ratings);
    }
    log::info!("{}", "Ratings".if_supports_color(Stdout, |t| t.bold()));
    for rating in &ratings {
        log::info!("  {:>3}  {}", rating.id, rating.name);
    }
    Ok(())
}
