//! SQLite schema creation and version check.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unsupported catalog schema version {found} (this build uses {expected})")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Schema version written by this build. Files at any other version are
/// refused rather than guessed at.
pub const CURRENT_VERSION: i32 = 1;

/// Create every table and index that is missing, then stamp the version.
/// Running it again on a current database changes nothing.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT INTO schema_version (version)
         SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM schema_version WHERE version = ?1)",
        [CURRENT_VERSION],
    )?;
    Ok(())
}

/// Open the catalog file at `path`, creating the schema on first use.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    match get_schema_version(&conn)? {
        0 => create_schema(&conn)?,
        CURRENT_VERSION => log::debug!("Catalog schema at version {}", CURRENT_VERSION),
        found => {
            return Err(SchemaError::VersionMismatch {
                expected: CURRENT_VERSION,
                found,
            });
        }
    }
    Ok(conn)
}

/// Open an in-memory database with the full schema and no rows.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Highest recorded schema version; 0 for a file with no catalog tables.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let tracked: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !tracked {
        return Ok(0);
    }
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(Into::into)
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Reference data
CREATE TABLE IF NOT EXISTS genres (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

-- AUTOINCREMENT keeps ids of deleted rows from being handed out again
CREATE TABLE IF NOT EXISTS films (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    release_date TEXT NOT NULL,
    duration INTEGER NOT NULL CHECK (duration > 0),
    rating_id INTEGER NOT NULL REFERENCES ratings(id)
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL,
    login TEXT NOT NULL,
    name TEXT NOT NULL,
    birthday TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS directors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

-- Join tables
CREATE TABLE IF NOT EXISTS film_genres (
    film_id INTEGER NOT NULL REFERENCES films(id) ON DELETE CASCADE,
    genre_id INTEGER NOT NULL REFERENCES genres(id),
    PRIMARY KEY (film_id, genre_id)
);

CREATE TABLE IF NOT EXISTS film_directors (
    film_id INTEGER NOT NULL REFERENCES films(id) ON DELETE CASCADE,
    director_id INTEGER NOT NULL REFERENCES directors(id) ON DELETE CASCADE,
    position INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (film_id, director_id)
);
CREATE INDEX IF NOT EXISTS idx_film_directors_director ON film_directors(director_id);

CREATE TABLE IF NOT EXISTS film_likes (
    film_id INTEGER NOT NULL REFERENCES films(id) ON DELETE CASCADE,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    PRIMARY KEY (film_id, user_id)
);
CREATE INDEX IF NOT EXISTS idx_film_likes_user ON film_likes(user_id);

CREATE TABLE IF NOT EXISTS friendships (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    friend_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    status TEXT NOT NULL DEFAULT 'CONFIRMED' CHECK (status IN ('PENDING', 'CONFIRMED')),
    PRIMARY KEY (user_id, friend_id),
    CHECK (user_id <> friend_id)
);
CREATE INDEX IF NOT EXISTS idx_friendships_friend ON friendships(friend_id);
"#;
