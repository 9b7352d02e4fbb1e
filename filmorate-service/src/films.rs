//! Film catalog operations and the aggregate views built on top of likes.
//!
//! Every write validates the film's own fields first, then resolves its
//! rating, genres, and directors against storage so that only known
//! references reach the backend. Rankings are computed from a single
//! `all_films` read.

use std::cmp::Ordering;
use std::sync::Arc;

use filmorate_catalog::{Director, DirectorSort, Entity, Film, Genre, User, validate_film};
use filmorate_db::{DirectorStorage, FilmStorage, ReferenceStorage, UserStorage};

use crate::error::{ServiceError, require};

#[derive(Clone)]
pub struct FilmService {
    films: Arc<dyn FilmStorage>,
    users: Arc<dyn UserStorage>,
    directors: Arc<dyn DirectorStorage>,
    reference: Arc<dyn ReferenceStorage>,
}

/// Most liked first, lower id first among equals.
pub fn by_popularity(a: &Film, b: &Film) -> Ordering {
    b.like_count()
        .cmp(&a.like_count())
        .then_with(|| a.id.cmp(&b.id))
}

impl FilmService {
    pub fn new(
        films: Arc<dyn FilmStorage>,
        users: Arc<dyn UserStorage>,
        directors: Arc<dyn DirectorStorage>,
        reference: Arc<dyn ReferenceStorage>,
    ) -> Self {
        Self {
            films,
            users,
            directors,
            reference,
        }
    }

    // ── Catalog ─────────────────────────────────────────────────────────────

    pub fn add_film(&self, film: &Film) -> Result<Film, ServiceError> {
        check(film)?;
        let film = self.resolve(film)?;
        let created = self.films.create_film(&film)?;
        log::info!("Added film {} '{}'", created.id, created.name);
        Ok(created)
    }

    /// Replace a film's fields and references. Its likes are kept.
    pub fn update_film(&self, film: &Film) -> Result<Film, ServiceError> {
        check(film)?;
        self.film(film.id)?;
        let film = self.resolve(film)?;
        let updated = self.films.update_film(&film)?;
        log::info!("Updated film {}", updated.id);
        Ok(updated)
    }

    pub fn film(&self, id: i64) -> Result<Film, ServiceError> {
        require(self.films.find_film(id)?, Entity::Film, id)
    }

    pub fn films(&self) -> Result<Vec<Film>, ServiceError> {
        Ok(self.films.all_films()?)
    }

    // ── Likes ───────────────────────────────────────────────────────────────

    /// Record that a user likes a film. Liking twice is a `Conflict`.
    pub fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), ServiceError> {
        self.films.add_like(film_id, user_id)?;
        log::info!("User {} liked film {}", user_id, film_id);
        Ok(())
    }

    /// Withdraw a like. The user may like the film again afterwards.
    pub fn remove_like(&self, film_id: i64, user_id: i64) -> Result<(), ServiceError> {
        self.films.remove_like(film_id, user_id)?;
        log::info!("User {} removed like from film {}", user_id, film_id);
        Ok(())
    }

    // ── Aggregates ──────────────────────────────────────────────────────────

    /// At most `count` films, most liked first.
    pub fn popular(&self, count: usize) -> Result<Vec<Film>, ServiceError> {
        let mut films = self.films.all_films()?;
        films.sort_by(by_popularity);
        films.truncate(count);
        log::debug!("Top {} popular films: found {}", count, films.len());
        Ok(films)
    }

    /// Films a director worked on, sorted by likes or by release date.
    pub fn films_by_director(
        &self,
        director_id: i64,
        sort: DirectorSort,
    ) -> Result<Vec<Film>, ServiceError> {
        require(
            self.directors.find_director(director_id)?,
            Entity::Director,
            director_id,
        )?;

        let mut films: Vec<Film> = self
            .films
            .all_films()?
            .into_iter()
            .filter(|f| f.has_director(director_id))
            .collect();
        match sort {
            DirectorSort::Likes => films.sort_by(by_popularity),
            DirectorSort::Year => films.sort_by(|a, b| {
                a.release_date
                    .cmp(&b.release_date)
                    .then_with(|| a.id.cmp(&b.id))
            }),
        }
        log::debug!(
            "Director {} has {} films (sorted by {:?})",
            director_id,
            films.len(),
            sort
        );
        Ok(films)
    }

    /// Films liked by both users, most liked first.
    pub fn common_films(&self, user_id: i64, other_id: i64) -> Result<Vec<Film>, ServiceError> {
        self.require_user(user_id)?;
        self.require_user(other_id)?;

        let mut films: Vec<Film> = self
            .films
            .all_films()?
            .into_iter()
            .filter(|f| f.likes.contains(&user_id) && f.likes.contains(&other_id))
            .collect();
        films.sort_by(by_popularity);
        log::debug!(
            "Users {} and {} both like {} films",
            user_id,
            other_id,
            films.len()
        );
        Ok(films)
    }

    // ── Helpers ─────────────────────────────────────────────────────────────

    /// Replace every reference on `film` with the stored record.
    fn resolve(&self, film: &Film) -> Result<Film, ServiceError> {
        let mut resolved = film.clone();
        let rating_id = film.rating.id;
        resolved.rating = require(self.reference.find_rating(rating_id)?, Entity::Rating, rating_id)?;
        resolved.genres = film
            .genres
            .iter()
            .map(|g| self.genre(g))
            .collect::<Result<_, _>>()?;
        resolved.directors = film
            .directors
            .iter()
            .map(|d| self.director(d))
            .collect::<Result<_, _>>()?;
        resolved.normalize_genres();
        resolved.dedup_directors();
        Ok(resolved)
    }

    fn genre(&self, genre: &Genre) -> Result<Genre, ServiceError> {
        require(self.reference.find_genre(genre.id)?, Entity::Genre, genre.id)
    }

    fn director(&self, director: &Director) -> Result<Director, ServiceError> {
        require(
            self.directors.find_director(director.id)?,
            Entity::Director,
            director.id,
        )
    }

    fn require_user(&self, id: i64) -> Result<User, ServiceError> {
        require(self.users.find_user(id)?, Entity::User, id)
    }
}

fn check(film: &Film) -> Result<(), ServiceError> {
    validate_film(film).map_err(|e| {
        log::warn!("Rejected film '{}': {}", film.name, e);
        ServiceError::from(e)
    })
}
