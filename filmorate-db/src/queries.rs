//! Read queries for the catalog database.
//!
//! Films are reassembled from the film row plus three joined fetches
//! (genres, directors, likes).

use std::collections::{BTreeSet, HashMap};

use filmorate_catalog::{Director, Film, Friendship, FriendshipStatus, Genre, Rating, User};
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::StorageError;

const FILM_COLUMNS: &str = "f.id, f.name, f.description, f.release_date, f.duration,
                            r.id, r.name
                            FROM films f JOIN ratings r ON r.id = f.rating_id";

// ── Film Lookups ────────────────────────────────────────────────────────────

/// Find a film by id, with genres, directors, and likes attached.
pub fn find_film(conn: &Connection, id: i64) -> Result<Option<Film>, StorageError> {
    let mut stmt = conn.prepare(&format!("SELECT {FILM_COLUMNS} WHERE f.id = ?1"))?;
    let Some(mut film) = stmt.query_row(params![id], row_to_film).optional()? else {
        return Ok(None);
    };
    film.genres = genres_for_film(conn, id)?;
    film.directors = directors_for_film(conn, id)?;
    film.likes = likes_for_film(conn, id)?;
    Ok(Some(film))
}

/// List all films ordered by id.
///
/// Join rows are fetched in bulk, one query per join table.
pub fn all_films(conn: &Connection) -> Result<Vec<Film>, StorageError> {
    let mut stmt = conn.prepare(&format!("SELECT {FILM_COLUMNS} ORDER BY f.id"))?;
    let films = stmt
        .query_map([], row_to_film)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut genres: HashMap<i64, Vec<Genre>> = HashMap::new();
    let mut stmt = conn.prepare(
        "SELECT fg.film_id, g.id, g.name
         FROM film_genres fg JOIN genres g ON g.id = fg.genre_id
         ORDER BY fg.film_id, g.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, Genre::new(row.get(1)?, row.get::<_, String>(2)?)))
    })?;
    for row in rows {
        let (film_id, genre) = row?;
        genres.entry(film_id).or_default().push(genre);
    }

    let mut directors: HashMap<i64, Vec<Director>> = HashMap::new();
    let mut stmt = conn.prepare(
        "SELECT fd.film_id, d.id, d.name
         FROM film_directors fd JOIN directors d ON d.id = fd.director_id
         ORDER BY fd.film_id, fd.position, d.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row_to_director_at(row, 1)?))
    })?;
    for row in rows {
        let (film_id, director) = row?;
        directors.entry(film_id).or_default().push(director);
    }

    let mut likes: HashMap<i64, BTreeSet<i64>> = HashMap::new();
    let mut stmt = conn.prepare("SELECT film_id, user_id FROM film_likes")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
    for row in rows {
        let (film_id, user_id) = row?;
        likes.entry(film_id).or_default().insert(user_id);
    }

    Ok(films
        .into_iter()
        .map(|mut film| {
            film.genres = genres.remove(&film.id).unwrap_or_default();
            film.directors = directors.remove(&film.id).unwrap_or_default();
            film.likes = likes.remove(&film.id).unwrap_or_default();
            film
        })
        .collect())
}

/// Genres of one film, ordered by genre id.
pub fn genres_for_film(conn: &Connection, film_id: i64) -> Result<Vec<Genre>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT g.id, g.name FROM genres g
         JOIN film_genres fg ON g.id = fg.genre_id
         WHERE fg.film_id = ?1 ORDER BY g.id",
    )?;
    let rows = stmt.query_map(params![film_id], |row| {
        Ok(Genre::new(row.get(0)?, row.get::<_, String>(1)?))
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Directors of one film in stored order.
pub fn directors_for_film(
    conn: &Connection,
    film_id: i64,
) -> Result<Vec<Director>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT d.id, d.name FROM directors d
         JOIN film_directors fd ON d.id = fd.director_id
         WHERE fd.film_id = ?1 ORDER BY fd.position, d.id",
    )?;
    let rows = stmt.query_map(params![film_id], |row| row_to_director_at(row, 0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn likes_for_film(conn: &Connection, film_id: i64) -> Result<BTreeSet<i64>, StorageError> {
    let mut stmt = conn.prepare("SELECT user_id FROM film_likes WHERE film_id = ?1")?;
    let rows = stmt.query_map(params![film_id], |row| row.get::<_, i64>(0))?;
    rows.collect::<Result<BTreeSet<_>, _>>().map_err(Into::into)
}

// ── User Lookups ────────────────────────────────────────────────────────────

pub fn find_user(conn: &Connection, id: i64) -> Result<Option<User>, StorageError> {
    conn.query_row(
        "SELECT id, email, login, name, birthday FROM users WHERE id = ?1",
        params![id],
        row_to_user,
    )
    .optional()
    .map_err(Into::into)
}

pub fn all_users(conn: &Connection) -> Result<Vec<User>, StorageError> {
    let mut stmt = conn.prepare("SELECT id, email, login, name, birthday FROM users ORDER BY id")?;
    let rows = stmt.query_map([], row_to_user)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Director Lookups ────────────────────────────────────────────────────────

pub fn find_director(conn: &Connection, id: i64) -> Result<Option<Director>, StorageError> {
    conn.query_row(
        "SELECT id, name FROM directors WHERE id = ?1",
        params![id],
        |row| row_to_director_at(row, 0),
    )
    .optional()
    .map_err(Into::into)
}

pub fn all_directors(conn: &Connection) -> Result<Vec<Director>, StorageError> {
    let mut stmt = conn.prepare("SELECT id, name FROM directors ORDER BY id")?;
    let rows = stmt.query_map([], |row| row_to_director_at(row, 0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Friendship Lookups ──────────────────────────────────────────────────────

/// Users on the far end of a confirmed edge from `user_id`.
pub fn friends_of(conn: &Connection, user_id: i64) -> Result<Vec<User>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.email, u.login, u.name, u.birthday
         FROM friendships fr JOIN users u ON u.id = fr.friend_id
         WHERE fr.user_id = ?1 AND fr.status = 'CONFIRMED'
         ORDER BY u.id",
    )?;
    let rows = stmt.query_map(params![user_id], row_to_user)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Users on the far end of confirmed edges from both `a` and `b`.
pub fn common_friends_of(conn: &Connection, a: i64, b: i64) -> Result<Vec<User>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.email, u.login, u.name, u.birthday
         FROM friendships fa
         JOIN friendships fb ON fb.friend_id = fa.friend_id
         JOIN users u ON u.id = fa.friend_id
         WHERE fa.user_id = ?1 AND fa.status = 'CONFIRMED'
           AND fb.user_id = ?2 AND fb.status = 'CONFIRMED'
           AND u.id NOT IN (?1, ?2)
         ORDER BY u.id",
    )?;
    let rows = stmt.query_map(params![a, b], row_to_user)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn friendships_of(conn: &Connection, user_id: i64) -> Result<Vec<Friendship>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT user_id, friend_id, status FROM friendships
         WHERE user_id = ?1 ORDER BY friend_id",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        let status: String = row.get(2)?;
        Ok(Friendship {
            user_id: row.get(0)?,
            friend_id: row.get(1)?,
            status: FriendshipStatus::from_str_loose(&status),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Reference Lookups ───────────────────────────────────────────────────────

pub fn find_genre(conn: &Connection, id: i64) -> Result<Option<Genre>, StorageError> {
    conn.query_row(
        "SELECT id, name FROM genres WHERE id = ?1",
        params![id],
        |row| Ok(Genre::new(row.get(0)?, row.get::<_, String>(1)?)),
    )
    .optional()
    .map_err(Into::into)
}

pub fn all_genres(conn: &Connection) -> Result<Vec<Genre>, StorageError> {
    let mut stmt = conn.prepare("SELECT id, name FROM genres ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Genre::new(row.get(0)?, row.get::<_, String>(1)?))
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn find_rating(conn: &Connection, id: i64) -> Result<Option<Rating>, StorageError> {
    conn.query_row(
        "SELECT id, name FROM ratings WHERE id = ?1",
        params![id],
        |row| Ok(Rating::new(row.get(0)?, row.get::<_, String>(1)?)),
    )
    .optional()
    .map_err(Into::into)
}

pub fn all_ratings(conn: &Connection) -> Result<Vec<Rating>, StorageError> {
    let mut stmt = conn.prepare("SELECT id, name FROM ratings ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Rating::new(row.get(0)?, row.get::<_, String>(1)?))
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, StorageError> {
    let count = |table: &str| -> Result<i64, StorageError> {
        let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
        Ok(n)
    };

    Ok(CatalogStats {
        films: count("films")?,
        users: count("users")?,
        directors: count("directors")?,
        genres: count("genres")?,
        ratings: count("ratings")?,
        likes: count("film_likes")?,
        friendships: count("friendships")?,
    })
}

/// Summary row counts for the catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub films: i64,
    pub users: i64,
    pub directors: i64,
    pub genres: i64,
    pub ratings: i64,
    pub likes: i64,
    /// Directed edges; a mutual friendship counts twice.
    pub friendships: i64,
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_film(row: &rusqlite::Row<'_>) -> rusqlite::Result<Film> {
    Ok(Film {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        release_date: row.get(3)?,
        duration: row.get(4)?,
        rating: Rating::new(row.get(5)?, row.get::<_, String>(6)?),
        genres: Vec::new(),
        likes: BTreeSet::new(),
        directors: Vec::new(),
    })
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        login: row.get(2)?,
        name: row.get(3)?,
        birthday: row.get(4)?,
    })
}

fn row_to_director_at(row: &rusqlite::Row<'_>, start: usize) -> rusqlite::Result<Director> {
    Ok(Director {
        id: row.get(start)?,
        name: row.get(start + 1)?,
    })
}
