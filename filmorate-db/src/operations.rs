//! Write operations against the catalog database.
//!
//! Functions here issue one or more statements on the connection they are
//! given and do not open transactions themselves. Callers that need several
//! statements to land together (film writes, friendship pairs, director
//! deletion) run them inside one transaction; see [`crate::SqliteStore`].

use filmorate_catalog::{
    Director, Entity, Film, FriendshipStatus, Genre, ReferenceData, User,
};
use rusqlite::{Connection, params};

use crate::error::StorageError;

// ── Film Operations ─────────────────────────────────────────────────────────

/// Insert a film row and its genre and director links. Returns the new id.
pub fn insert_film(conn: &Connection, film: &Film) -> Result<i64, StorageError> {
    ensure_exists(conn, Entity::Rating, film.rating.id)?;
    conn.execute(
        "INSERT INTO films (name, description, release_date, duration, rating_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            film.name,
            film.description,
            film.release_date,
            film.duration,
            film.rating.id,
        ],
    )?;
    let id = conn.last_insert_rowid();

    replace_film_genres(conn, id, &film.genres)?;
    replace_film_directors(conn, id, &film.directors)?;
    Ok(id)
}

/// Update a film row and fully replace its genre and director links.
/// Likes are left untouched.
pub fn update_film(conn: &Connection, film: &Film) -> Result<(), StorageError> {
    ensure_exists(conn, Entity::Film, film.id)?;
    ensure_exists(conn, Entity::Rating, film.rating.id)?;
    let changed = conn.execute(
        "UPDATE films SET name = ?2, description = ?3, release_date = ?4,
             duration = ?5, rating_id = ?6
         WHERE id = ?1",
        params![
            film.id,
            film.name,
            film.description,
            film.release_date,
            film.duration,
            film.rating.id,
        ],
    )?;
    if changed == 0 {
        return Err(StorageError::not_found(Entity::Film, film.id));
    }

    replace_film_genres(conn, film.id, &film.genres)?;
    replace_film_directors(conn, film.id, &film.directors)?;
    Ok(())
}

/// Clear and re-insert a film's genre links. Repeated ids collapse to one row.
pub fn replace_film_genres(
    conn: &Connection,
    film_id: i64,
    genres: &[Genre],
) -> Result<(), StorageError> {
    conn.execute("DELETE FROM film_genres WHERE film_id = ?1", params![film_id])?;
    for genre in genres {
        ensure_exists(conn, Entity::Genre, genre.id)?;
        conn.execute(
            "INSERT OR IGNORE INTO film_genres (film_id, genre_id) VALUES (?1, ?2)",
            params![film_id, genre.id],
        )?;
    }
    Ok(())
}

/// Clear and re-insert a film's director links, recording caller order.
/// A repeated director keeps its first position.
pub fn replace_film_directors(
    conn: &Connection,
    film_id: i64,
    directors: &[Director],
) -> Result<(), StorageError> {
    conn.execute(
        "DELETE FROM film_directors WHERE film_id = ?1",
        params![film_id],
    )?;
    for (position, director) in directors.iter().enumerate() {
        ensure_exists(conn, Entity::Director, director.id)?;
        conn.execute(
            "INSERT OR IGNORE INTO film_directors (film_id, director_id, position)
             VALUES (?1, ?2, ?3)",
            params![film_id, director.id, position as i64],
        )?;
    }
    Ok(())
}

// ── Like Operations ─────────────────────────────────────────────────────────

/// Insert a like. `Conflict` if the user already likes the film.
pub fn insert_like(conn: &Connection, film_id: i64, user_id: i64) -> Result<(), StorageError> {
    ensure_exists(conn, Entity::Film, film_id)?;
    ensure_exists(conn, Entity::User, user_id)?;
    let changed = conn.execute(
        "INSERT OR IGNORE INTO film_likes (film_id, user_id) VALUES (?1, ?2)",
        params![film_id, user_id],
    )?;
    if changed == 0 {
        return Err(StorageError::conflict(format!(
            "user {user_id} already likes film {film_id}"
        )));
    }
    Ok(())
}

/// Delete a like. `NotFound(Like)` if there was none.
pub fn delete_like(conn: &Connection, film_id: i64, user_id: i64) -> Result<(), StorageError> {
    ensure_exists(conn, Entity::Film, film_id)?;
    ensure_exists(conn, Entity::User, user_id)?;
    let changed = conn.execute(
        "DELETE FROM film_likes WHERE film_id = ?1 AND user_id = ?2",
        params![film_id, user_id],
    )?;
    if changed == 0 {
        return Err(StorageError::like_not_found(film_id, user_id));
    }
    Ok(())
}

// ── User Operations ─────────────────────────────────────────────────────────

/// Insert a new user. Returns the generated ID.
pub fn insert_user(conn: &Connection, user: &User) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO users (email, login, name, birthday) VALUES (?1, ?2, ?3, ?4)",
        params![user.email, user.login, user.name, user.birthday],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_user(conn: &Connection, user: &User) -> Result<(), StorageError> {
    let changed = conn.execute(
        "UPDATE users SET email = ?2, login = ?3, name = ?4, birthday = ?5 WHERE id = ?1",
        params![user.id, user.email, user.login, user.name, user.birthday],
    )?;
    if changed == 0 {
        return Err(StorageError::not_found(Entity::User, user.id));
    }
    Ok(())
}

// ── Director Operations ─────────────────────────────────────────────────────

/// Insert a new director. Returns the generated ID.
pub fn insert_director(conn: &Connection, director: &Director) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO directors (name) VALUES (?1)",
        params![director.name],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_director(conn: &Connection, director: &Director) -> Result<(), StorageError> {
    let changed = conn.execute(
        "UPDATE directors SET name = ?2 WHERE id = ?1",
        params![director.id, director.name],
    )?;
    if changed == 0 {
        return Err(StorageError::not_found(Entity::Director, director.id));
    }
    Ok(())
}

/// Delete a director along with its film links.
pub fn delete_director(conn: &Connection, id: i64) -> Result<(), StorageError> {
    ensure_exists(conn, Entity::Director, id)?;
    conn.execute(
        "DELETE FROM film_directors WHERE director_id = ?1",
        params![id],
    )?;
    conn.execute("DELETE FROM directors WHERE id = ?1", params![id])?;
    Ok(())
}

// ── Friendship Operations ───────────────────────────────────────────────────

/// Insert or update one directed friendship edge.
pub fn upsert_friendship(
    conn: &Connection,
    user_id: i64,
    friend_id: i64,
    status: FriendshipStatus,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO friendships (user_id, friend_id, status)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id, friend_id) DO UPDATE SET
             status = excluded.status",
        params![user_id, friend_id, status.as_str()],
    )?;
    Ok(())
}

/// Delete one directed edge. Returns the number of rows removed.
pub fn delete_friendship(
    conn: &Connection,
    user_id: i64,
    friend_id: i64,
) -> Result<usize, StorageError> {
    let removed = conn.execute(
        "DELETE FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
        params![user_id, friend_id],
    )?;
    Ok(removed)
}

// ── Reference Seeding ───────────────────────────────────────────────────────

/// Load genres and ratings into the reference tables.
///
/// Safe to call repeatedly (uses upsert).
pub fn seed_reference(conn: &Connection, data: &ReferenceData) -> Result<SeedStats, StorageError> {
    let mut stats = SeedStats::default();

    for genre in &data.genres {
        conn.execute(
            "INSERT INTO genres (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            params![genre.id, genre.name],
        )?;
        stats.genres += 1;
    }

    for rating in &data.ratings {
        conn.execute(
            "INSERT INTO ratings (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            params![rating.id, rating.name],
        )?;
        stats.ratings += 1;
    }

    Ok(stats)
}

/// Statistics from seeding the reference tables.
#[derive(Debug, Default)]
pub struct SeedStats {
    pub genres: usize,
    pub ratings: usize,
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Table holding rows of the given kind. Join-table kinds have no `id` column.
pub(crate) fn table_for(entity: Entity) -> Option<&'static str> {
    match entity {
        Entity::Film => Some("films"),
        Entity::User => Some("users"),
        Entity::Director => Some("directors"),
        Entity::Genre => Some("genres"),
        Entity::Rating => Some("ratings"),
        Entity::Friendship | Entity::Like => None,
    }
}

/// Check that a row with `id` exists in the entity's table.
pub fn exists(conn: &Connection, entity: Entity, id: i64) -> Result<bool, StorageError> {
    let Some(table) = table_for(entity) else {
        return Ok(false);
    };
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1)");
    let found: bool = conn.query_row(&sql, params![id], |row| row.get(0))?;
    Ok(found)
}

/// Fail with `NotFound` unless a row with `id` exists.
pub fn ensure_exists(conn: &Connection, entity: Entity, id: i64) -> Result<(), StorageError> {
    if exists(conn, entity, id)? {
        Ok(())
    } else {
        Err(StorageError::not_found(entity, id))
    }
}
