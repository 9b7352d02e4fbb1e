use filmorate_catalog::{DirectorSort, Film};
use filmorate_service::Services;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::{print_json, truncate_str};
use crate::CliError;

pub(crate) fn run_popular(svc: &Services, count: usize, json: bool) -> Result<(), CliError> {
    let films = svc.films.popular(count)?;
    if json {
        return print_json(&films);
    }
    log::info!(
        "{}",
        format!("Top {} films", count).if_supports_color(Stdout, |t| t.bold()),
    );
    print_films(&films);
    Ok(())
}

pub(crate) fn run_director(
    svc: &Services,
    director_id: i64,
    sort: &str,
    json: bool,
) -> Result<(), CliError> {
    let director = svc.directors.director(director_id)?;
    let films = svc
        .films
        .films_by_director(director_id, DirectorSort::from_str_loose(sort))?;
    if json {
        return print_json(&films);
    }
    log::info!(
        "{} {}",
        "Films directed by".if_supports_color(Stdout, |t| t.bold()),
        director.name.if_supports_color(Stdout, |t| t.cyan()),
    );
    print_films(&films);
    Ok(())
}

pub(crate) fn run_common(svc: &Services, user_id: i64, other_id: i64, json: bool) -> Result<(), CliError> {
    let films = svc.films.common_films(user_id, other_id)?;
    if json {
        return print_json(&films);
    }
    log::info!(
        "{}",
        format!("Films liked by users {} and {}", user_id, other_id)
            .if_supports_color(Stdout, |t| t.bold()),
    );
    print_films(&films);
    Ok(())
}

pub(crate) fn run_film(svc: &Services, film_id: i64, json: bool) -> Result<(), CliError> {
    let film = svc.films.film(film_id)?;
    if json {
        return print_json(&film);
    }
    log::info!("{}", film.name.if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Released:   {}", film.release_date);
    log::info!("  Duration:   {} min", film.duration);
    log::info!("  Rating:     {}", film.rating.name);
    let genres: Vec<&str> = film.genres.iter().map(|g| g.name.as_str()).collect();
    log::info!("  Genres:     {}", genres.join(", "));
    let directors: Vec<&str> = film.directors.iter().map(|d| d.name.as_str()).collect();
    log::info!("  Directors:  {}", directors.join(", "));
    log::info!("  Likes:      {}", film.like_count());
    if !film.description.is_empty() {
        crate::log_blank();
        log::info!("  {}", film.description);
    }
    Ok(())
}

fn print_films(films: &[Film]) {
    if films.is_empty() {
        log::info!("  {}", "(none)".if_supports_color(Stdout, |t| t.dimmed()));
        return;
    }
    for film in films {
        log::info!(
            "  {:>5}  {:<36}  {}  {:>6} likes  {}",
            film.id,
            truncate_str(&film.name, 36),
            film.release_date.format("%Y"),
            film.like_count(),
            film.rating.name.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
