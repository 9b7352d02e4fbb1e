//! Process-local backend keeping every table in ordered maps.
//!
//! All state sits behind one `RwLock`: a mutation holds the write lock for
//! its whole check-then-write sequence and a read sees one snapshot. Ids
//! come from atomic counters and are never handed out twice, even after a
//! delete.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use filmorate_catalog::{
    Director, Entity, Film, Friendship, FriendshipStatus, Genre, Rating, ReferenceData, User,
};

use crate::contracts::{
    DirectorStorage, FilmStorage, FriendshipStorage, ReferenceStorage, UserStorage,
};
use crate::error::StorageError;

#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<State>,
    next_film_id: AtomicI64,
    next_user_id: AtomicI64,
    next_director_id: AtomicI64,
}

/// A film as stored: references are kept by id and resolved on read, the
/// same way the relational backend joins them.
#[derive(Debug, Clone)]
struct FilmRow {
    film: Film,
    rating_id: i64,
    genre_ids: BTreeSet<i64>,
    director_ids: Vec<i64>,
    likes: BTreeSet<i64>,
}

#[derive(Debug, Default)]
struct State {
    films: BTreeMap<i64, FilmRow>,
    users: BTreeMap<i64, User>,
    directors: BTreeMap<i64, Director>,
    genres: BTreeMap<i64, Genre>,
    ratings: BTreeMap<i64, Rating>,
    friendships: BTreeMap<(i64, i64), FriendshipStatus>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store with the standard reference set.
    pub fn new() -> Self {
        Self::with_reference(&ReferenceData::standard())
    }

    pub fn with_reference(reference: &ReferenceData) -> Self {
        let state = State {
            genres: reference.genres.iter().map(|g| (g.id, g.clone())).collect(),
            ratings: reference.ratings.iter().map(|r| (r.id, r.clone())).collect(),
            ..State::default()
        };
        Self {
            state: RwLock::new(state),
            next_film_id: AtomicI64::new(1),
            next_user_id: AtomicI64::new(1),
            next_director_id: AtomicI64::new(1),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StorageError> {
        self.state.read().map_err(|_| StorageError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StorageError> {
        self.state.write().map_err(|_| StorageError::LockPoisoned)
    }
}

fn allocate(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::SeqCst)
}

impl State {
    fn ensure(&self, entity: Entity, id: i64) -> Result<(), StorageError> {
        let found = match entity {
            Entity::Film => self.films.contains_key(&id),
            Entity::User => self.users.contains_key(&id),
            Entity::Director => self.directors.contains_key(&id),
            Entity::Genre => self.genres.contains_key(&id),
            Entity::Rating => self.ratings.contains_key(&id),
            Entity::Friendship | Entity::Like => false,
        };
        if found {
            Ok(())
        } else {
            Err(StorageError::not_found(entity, id))
        }
    }

    /// Check every reference a film write would store.
    fn check_film_refs(&self, film: &Film) -> Result<(), StorageError> {
        self.ensure(Entity::Rating, film.rating.id)?;
        for genre in &film.genres {
            self.ensure(Entity::Genre, genre.id)?;
        }
        for director in &film.directors {
            self.ensure(Entity::Director, director.id)?;
        }
        Ok(())
    }

    fn assemble(&self, row: &FilmRow) -> Film {
        let mut film = row.film.clone();
        if let Some(rating) = self.ratings.get(&row.rating_id) {
            film.rating = rating.clone();
        }
        film.genres = row
            .genre_ids
            .iter()
            .filter_map(|id| self.genres.get(id).cloned())
            .collect();
        film.directors = row
            .director_ids
            .iter()
            .filter_map(|id| self.directors.get(id).cloned())
            .collect();
        film.likes = row.likes.clone();
        film
    }

    fn film(&self, id: i64) -> Result<Film, StorageError> {
        self.films
            .get(&id)
            .map(|row| self.assemble(row))
            .ok_or_else(|| StorageError::not_found(Entity::Film, id))
    }
}

fn film_row(film: &Film, likes: BTreeSet<i64>) -> FilmRow {
    let mut director_ids = Vec::with_capacity(film.directors.len());
    for director in &film.directors {
        if !director_ids.contains(&director.id) {
            director_ids.push(director.id);
        }
    }
    FilmRow {
        film: film.clone(),
        rating_id: film.rating.id,
        genre_ids: film.genres.iter().map(|g| g.id).collect(),
        director_ids,
        likes,
    }
}

impl FilmStorage for MemoryStore {
    fn create_film(&self, film: &Film) -> Result<Film, StorageError> {
        let mut state = self.write()?;
        state.check_film_refs(film)?;

        let id = allocate(&self.next_film_id);
        let mut row = film_row(film, BTreeSet::new());
        row.film.id = id;
        state.films.insert(id, row);
        state.film(id)
    }

    fn update_film(&self, film: &Film) -> Result<Film, StorageError> {
        let mut state = self.write()?;
        let likes = match state.films.get(&film.id) {
            Some(existing) => existing.likes.clone(),
            None => return Err(StorageError::not_found(Entity::Film, film.id)),
        };
        state.check_film_refs(film)?;

        state.films.insert(film.id, film_row(film, likes));
        state.film(film.id)
    }

    fn find_film(&self, id: i64) -> Result<Option<Film>, StorageError> {
        let state = self.read()?;
        Ok(state.films.get(&id).map(|row| state.assemble(row)))
    }

    fn all_films(&self) -> Result<Vec<Film>, StorageError> {
        let state = self.read()?;
        Ok(state.films.values().map(|row| state.assemble(row)).collect())
    }

    fn add_like(&self, film_id: i64, user_id: i64) -> Result<(), StorageError> {
        let mut state = self.write()?;
        state.ensure(Entity::Film, film_id)?;
        state.ensure(Entity::User, user_id)?;
        let row = state
            .films
            .get_mut(&film_id)
            .ok_or_else(|| StorageError::not_found(Entity::Film, film_id))?;
        if !row.likes.insert(user_id) {
            return Err(StorageError::conflict(format!(
                "user {user_id} already likes film {film_id}"
            )));
        }
        Ok(())
    }

    fn remove_like(&self, film_id: i64, user_id: i64) -> Result<(), StorageError> {
        let mut state = self.write()?;
        state.ensure(Entity::Film, film_id)?;
        state.ensure(Entity::User, user_id)?;
        let row = state
            .films
            .get_mut(&film_id)
            .ok_or_else(|| StorageError::not_found(Entity::Film, film_id))?;
        if !row.likes.remove(&user_id) {
            return Err(StorageError::like_not_found(film_id, user_id));
        }
        Ok(())
    }
}

impl UserStorage for MemoryStore {
    fn create_user(&self, user: &User) -> Result<User, StorageError> {
        let mut state = self.write()?;
        let id = allocate(&self.next_user_id);
        let user = User { id, ..user.clone() };
        state.users.insert(id, user.clone());
        Ok(user)
    }

    fn update_user(&self, user: &User) -> Result<User, StorageError> {
        let mut state = self.write()?;
        match state.users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user.clone())
            }
            None => Err(StorageError::not_found(Entity::User, user.id)),
        }
    }

    fn find_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    fn all_users(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.read()?.users.values().cloned().collect())
    }
}

impl DirectorStorage for MemoryStore {
    fn create_director(&self, director: &Director) -> Result<Director, StorageError> {
        let mut state = self.write()?;
        let id = allocate(&self.next_director_id);
        let director = Director {
            id,
            name: director.name.clone(),
        };
        state.directors.insert(id, director.clone());
        Ok(director)
    }

    fn update_director(&self, director: &Director) -> Result<Director, StorageError> {
        let mut state = self.write()?;
        match state.directors.get_mut(&director.id) {
            Some(existing) => {
                *existing = director.clone();
                Ok(director.clone())
            }
            None => Err(StorageError::not_found(Entity::Director, director.id)),
        }
    }

    fn find_director(&self, id: i64) -> Result<Option<Director>, StorageError> {
        Ok(self.read()?.directors.get(&id).cloned())
    }

    fn all_directors(&self) -> Result<Vec<Director>, StorageError> {
        Ok(self.read()?.directors.values().cloned().collect())
    }

    fn delete_director(&self, id: i64) -> Result<(), StorageError> {
        let mut state = self.write()?;
        if state.directors.remove(&id).is_none() {
            return Err(StorageError::not_found(Entity::Director, id));
        }
        for row in state.films.values_mut() {
            row.director_ids.retain(|&d| d != id);
        }
        Ok(())
    }

    fn directors_for_film(&self, film_id: i64) -> Result<Vec<Director>, StorageError> {
        let state = self.read()?;
        Ok(state
            .films
            .get(&film_id)
            .map(|row| state.assemble(row).directors)
            .unwrap_or_default())
    }
}

impl FriendshipStorage for MemoryStore {
    fn add_friendship(&self, user_id: i64, friend_id: i64) -> Result<(), StorageError> {
        if user_id == friend_id {
            return Err(StorageError::SelfFriendship(user_id));
        }
        let mut state = self.write()?;
        state.ensure(Entity::User, user_id)?;
        state.ensure(Entity::User, friend_id)?;
        state
            .friendships
            .insert((user_id, friend_id), FriendshipStatus::Confirmed);
        state
            .friendships
            .insert((friend_id, user_id), FriendshipStatus::Confirmed);
        Ok(())
    }

    fn remove_friendship(&self, user_id: i64, friend_id: i64) -> Result<(), StorageError> {
        let mut state = self.write()?;
        state.ensure(Entity::User, user_id)?;
        state.ensure(Entity::User, friend_id)?;
        state.friendships.remove(&(user_id, friend_id));
        state.friendships.remove(&(friend_id, user_id));
        Ok(())
    }

    fn friends(&self, user_id: i64) -> Result<Vec<User>, StorageError> {
        let state = self.read()?;
        Ok(state
            .friendships
            .range((user_id, i64::MIN)..=(user_id, i64::MAX))
            .filter(|(_, status)| **status == FriendshipStatus::Confirmed)
            .filter_map(|((_, friend_id), _)| state.users.get(friend_id).cloned())
            .collect())
    }

    fn common_friends(&self, user_id: i64, other_id: i64) -> Result<Vec<User>, StorageError> {
        let state = self.read()?;
        let confirmed = |from: i64, to: i64| {
            state.friendships.get(&(from, to)) == Some(&FriendshipStatus::Confirmed)
        };
        Ok(state
            .friendships
            .range((user_id, i64::MIN)..=(user_id, i64::MAX))
            .filter(|(_, status)| **status == FriendshipStatus::Confirmed)
            .map(|(&(_, friend_id), _)| friend_id)
            .filter(|&id| id != user_id && id != other_id && confirmed(other_id, id))
            .filter_map(|id| state.users.get(&id).cloned())
            .collect())
    }

    fn friendships(&self, user_id: i64) -> Result<Vec<Friendship>, StorageError> {
        let state = self.read()?;
        Ok(state
            .friendships
            .range((user_id, i64::MIN)..=(user_id, i64::MAX))
            .map(|(&(user_id, friend_id), &status)| Friendship {
                user_id,
                friend_id,
                status,
            })
            .collect())
    }
}

impl ReferenceStorage for MemoryStore {
    fn find_genre(&self, id: i64) -> Result<Option<Genre>, StorageError> {
        Ok(self.read()?.genres.get(&id).cloned())
    }

    fn all_genres(&self) -> Result<Vec<Genre>, StorageError> {
        Ok(self.read()?.genres.values().cloned().collect())
    }

    fn find_rating(&self, id: i64) -> Result<Option<Rating>, StorageError> {
        Ok(self.read()?.ratings.get(&id).cloned())
    }

    fn all_ratings(&self) -> Result<Vec<Rating>, StorageError> {
        Ok(self.read()?.ratings.values().cloned().collect())
    }
}
