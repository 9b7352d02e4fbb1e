//! Relational backend: the storage contracts over one SQLite connection.
//!
//! The connection sits behind a mutex. Writes run in an immediate
//! transaction, so a multi-statement write either lands whole or not at
//! all; reads run in a deferred transaction so an aggregate query sees one
//! snapshot.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use filmorate_catalog::{
    Director, Entity, Film, Friendship, FriendshipStatus, Genre, Rating, ReferenceData, User,
};
use rusqlite::{Connection, TransactionBehavior};

use crate::contracts::{
    DirectorStorage, FilmStorage, FriendshipStorage, ReferenceStorage, UserStorage,
};
use crate::error::StorageError;
use crate::queries::CatalogStats;
use crate::{operations, queries, schema};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open or create a database file. Empty reference tables are seeded
    /// from `reference`.
    pub fn open(path: &Path, reference: &ReferenceData) -> Result<Self, StorageError> {
        let conn = schema::open_database(path)?;
        log::debug!("Opened catalog database at {}", path.display());
        Self::with_reference(conn, reference)
    }

    /// A private in-memory database seeded with the standard reference set.
    pub fn open_memory() -> Result<Self, StorageError> {
        Self::open_memory_with(&ReferenceData::standard())
    }

    pub fn open_memory_with(reference: &ReferenceData) -> Result<Self, StorageError> {
        Self::with_reference(schema::open_memory()?, reference)
    }

    fn with_reference(conn: Connection, reference: &ReferenceData) -> Result<Self, StorageError> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.write(|conn| {
            let stats = queries::catalog_stats(conn)?;
            if stats.genres == 0 && stats.ratings == 0 {
                let seeded = operations::seed_reference(conn, reference)?;
                log::debug!(
                    "Seeded {} genres and {} ratings",
                    seeded.genres,
                    seeded.ratings
                );
            }
            Ok(())
        })?;
        Ok(store)
    }

    /// Lock the underlying connection for ad-hoc queries.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    pub fn stats(&self) -> Result<CatalogStats, StorageError> {
        self.read(queries::catalog_stats)
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut conn = self.connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    fn read<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

/// Reload a row that the same transaction just wrote.
fn reload<T>(found: Option<T>, entity: Entity, id: i64) -> Result<T, StorageError> {
    found.ok_or_else(|| StorageError::not_found(entity, id))
}

impl FilmStorage for SqliteStore {
    fn create_film(&self, film: &Film) -> Result<Film, StorageError> {
        self.write(|conn| {
            let id = operations::insert_film(conn, film)?;
            reload(queries::find_film(conn, id)?, Entity::Film, id)
        })
    }

    fn update_film(&self, film: &Film) -> Result<Film, StorageError> {
        self.write(|conn| {
            operations::update_film(conn, film)?;
            reload(queries::find_film(conn, film.id)?, Entity::Film, film.id)
        })
    }

    fn find_film(&self, id: i64) -> Result<Option<Film>, StorageError> {
        self.read(|conn| queries::find_film(conn, id))
    }

    fn all_films(&self) -> Result<Vec<Film>, StorageError> {
        self.read(queries::all_films)
    }

    fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), StorageError> {
        self.write(|conn| operations::insert_like(conn, film_id, user_id))
    }

    fn remove_like(&self, film_id: i64, user_id: i64) -> Result<(), StorageError> {
        self.write(|conn| operations::delete_like(conn, film_id, user_id))
    }
}

impl UserStorage for SqliteStore {
    fn create_user(&self, user: &User) -> Result<User, StorageError> {
        self.write(|conn| {
            let id = operations::insert_user(conn, user)?;
            reload(queries::find_user(conn, id)?, Entity::User, id)
        })
    }

    fn update_user(&self, user: &User) -> Result<User, StorageError> {
        self.write(|conn| {
            operations::update_user(conn, user)?;
            reload(queries::find_user(conn, user.id)?, Entity::User, user.id)
        })
    }

    fn find_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        self.read(|conn| queries::find_user(conn, id))
    }

    fn all_users(&self) -> Result<Vec<User>, StorageError> {
        self.read(queries::all_users)
    }
}

impl DirectorStorage for SqliteStore {
    fn create_director(&self, director: &Director) -> Result<Director, StorageError> {
        self.write(|conn| {
            let id = operations::insert_director(conn, director)?;
            reload(queries::find_director(conn, id)?, Entity::Director, id)
        })
    }

    fn update_director(&self, director: &Director) -> Result<Director, StorageError> {
        self.write(|conn| {
            operations::update_director(conn, director)?;
            reload(
                queries::find_director(conn, director.id)?,
                Entity::Director,
                director.id,
            )
        })
    }

    fn find_director(&self, id: i64) -> Result<Option<Director>, StorageError> {
        self.read(|conn| queries::find_director(conn, id))
    }

    fn all_directors(&self) -> Result<Vec<Director>, StorageError> {
        self.read(queries::all_directors)
    }

    fn delete_director(&self, id: i64) -> Result<(), StorageError> {
        self.write(|conn| operations::delete_director(conn, id))
    }

    fn directors_for_film(&self, film_id: i64) -> Result<Vec<Director>, StorageError> {
        self.read(|conn| queries::directors_for_film(conn, film_id))
    }
}

impl FriendshipStorage for SqliteStore {
    fn add_friendship(&self, user_id: i64, friend_id: i64) -> Result<(), StorageError> {
        if user_id == friend_id {
            return Err(StorageError::SelfFriendship(user_id));
        }
        self.write(|conn| {
            operations::ensure_exists(conn, Entity::User, user_id)?;
            operations::ensure_exists(conn, Entity::User, friend_id)?;
            operations::upsert_friendship(conn, user_id, friend_id, FriendshipStatus::Confirmed)?;
            operations::upsert_friendship(conn, friend_id, user_id, FriendshipStatus::Confirmed)
        })
    }

    fn remove_friendship(&self, user_id: i64, friend_id: i64) -> Result<(), StorageError> {
        self.write(|conn| {
            operations::ensure_exists(conn, Entity::User, user_id)?;
            operations::ensure_exists(conn, Entity::User, friend_id)?;
            operations::delete_friendship(conn, user_id, friend_id)?;
            operations::delete_friendship(conn, friend_id, user_id)?;
            Ok(())
        })
    }

    fn friends(&self, user_id: i64) -> Result<Vec<User>, StorageError> {
        self.read(|conn| queries::friends_of(conn, user_id))
    }

    fn common_friends(&self, user_id: i64, other_id: i64) -> Result<Vec<User>, StorageError> {
        self.read(|conn| queries::common_friends_of(conn, user_id, other_id))
    }

    fn friendships(&self, user_id: i64) -> Result<Vec<Friendship>, StorageError> {
        self.read(|conn| queries::friendships_of(conn, user_id))
    }
}

impl ReferenceStorage for SqliteStore {
    fn find_genre(&self, id: i64) -> Result<Option<Genre>, StorageError> {
        self.read(|conn| queries::find_genre(conn, id))
    }

    fn all_genres(&self) -> Result<Vec<Genre>, StorageError> {
        self.read(queries::all_genres)
    }

    fn find_rating(&self, id: i64) -> Result<Option<Rating>, StorageError> {
        self.read(|conn| queries::find_rating(conn, id))
    }

    fn all_ratings(&self) -> Result<Vec<Rating>, StorageError> {
        self.read(queries::all_ratings)
    }
}
