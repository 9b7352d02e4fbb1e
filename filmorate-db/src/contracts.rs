//! Storage contracts shared by every backend.
//!
//! Each trait is object safe and takes `&self`; backends serialise their own
//! mutations. Lookups return `Ok(None)` for a missing id and reserve
//! [`StorageError::NotFound`] for operations that need the target to exist.
//! `all_*` methods return records ordered by id.

use filmorate_catalog::{Director, Film, Friendship, Genre, Rating, User};

use crate::error::StorageError;

pub trait FilmStorage: Send + Sync {
    /// Persist a new film under a fresh id and return the stored aggregate.
    ///
    /// The rating, genres, and directors must already exist. Likes on the
    /// input are ignored: a new film starts with none.
    fn create_film(&self, film: &Film) -> Result<Film, StorageError>;

    /// Replace a film's fields and its genre/director links, keeping its
    /// likes. Fails with `NotFound` if `film.id` is unknown.
    fn update_film(&self, film: &Film) -> Result<Film, StorageError>;

    fn find_film(&self, id: i64) -> Result<Option<Film>, StorageError>;

    /// Every film, read as one consistent snapshot.
    fn all_films(&self) -> Result<Vec<Film>, StorageError>;

    /// Record that a user likes a film. `Conflict` if already liked.
    fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), StorageError>;

    /// Withdraw a like. `NotFound(Like)` if the pair was never recorded.
    fn remove_like(&self, film_id: i64, user_id: i64) -> Result<(), StorageError>;
}

pub trait UserStorage: Send + Sync {
    fn create_user(&self, user: &User) -> Result<User, StorageError>;
    fn update_user(&self, user: &User) -> Result<User, StorageError>;
    fn find_user(&self, id: i64) -> Result<Option<User>, StorageError>;
    fn all_users(&self) -> Result<Vec<User>, StorageError>;
}

pub trait DirectorStorage: Send + Sync {
    fn create_director(&self, director: &Director) -> Result<Director, StorageError>;
    fn update_director(&self, director: &Director) -> Result<Director, StorageError>;
    fn find_director(&self, id: i64) -> Result<Option<Director>, StorageError>;
    fn all_directors(&self) -> Result<Vec<Director>, StorageError>;

    /// Remove a director and every film link to it. Films stay.
    fn delete_director(&self, id: i64) -> Result<(), StorageError>;

    /// Directors of one film, in the film's director order.
    fn directors_for_film(&self, film_id: i64) -> Result<Vec<Director>, StorageError>;
}

pub trait FriendshipStorage: Send + Sync {
    /// Write confirmed edges in both directions. Re-adding is a no-op.
    fn add_friendship(&self, user_id: i64, friend_id: i64) -> Result<(), StorageError>;

    /// Remove both directional edges. Missing edges are not an error.
    fn remove_friendship(&self, user_id: i64, friend_id: i64) -> Result<(), StorageError>;

    /// Users reachable over a confirmed edge from `user_id`, ordered by id.
    fn friends(&self, user_id: i64) -> Result<Vec<User>, StorageError>;

    /// Users with a confirmed edge from both `user_id` and `other_id`,
    /// ordered by id, read as one snapshot. Never contains either argument.
    fn common_friends(&self, user_id: i64, other_id: i64) -> Result<Vec<User>, StorageError>;

    /// Raw outgoing edges of `user_id`, ordered by friend id.
    fn friendships(&self, user_id: i64) -> Result<Vec<Friendship>, StorageError>;
}

/// Read-only lookups into the genre and rating tables.
pub trait ReferenceStorage: Send + Sync {
    fn find_genre(&self, id: i64) -> Result<Option<Genre>, StorageError>;
    fn all_genres(&self) -> Result<Vec<Genre>, StorageError>;
    fn find_rating(&self, id: i64) -> Result<Option<Rating>, StorageError>;
    fn all_ratings(&self) -> Result<Vec<Rating>, StorageError>;
}

/// A complete backend: every contract on one shared state.
pub trait Store:
    FilmStorage + UserStorage + DirectorStorage + FriendshipStorage + ReferenceStorage
{
}

impl<T> Store for T where
    T: FilmStorage + UserStorage + DirectorStorage + FriendshipStorage + ReferenceStorage
{
}
