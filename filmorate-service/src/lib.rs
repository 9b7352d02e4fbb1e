//! Catalog services: validation, reference resolution, and the aggregate
//! views (popularity, filmographies, common films and friends) over any
//! storage backend.
//!
//! Services only see the storage traits, so the same calls behave the same
//! on [`filmorate_db::MemoryStore`] and [`filmorate_db::SqliteStore`].

pub mod directors;
pub mod error;
pub mod films;
pub mod friends;
pub mod reference;
pub mod users;

use std::sync::Arc;

use filmorate_db::Store;

pub use directors::DirectorService;
pub use error::ServiceError;
pub use films::{FilmService, by_popularity};
pub use friends::FriendshipService;
pub use reference::ReferenceService;
pub use users::UserService;

/// Every service wired onto one shared backend.
#[derive(Clone)]
pub struct Services {
    pub films: FilmService,
    pub users: UserService,
    pub directors: DirectorService,
    pub friends: FriendshipService,
    pub reference: ReferenceService,
}

impl Services {
    pub fn new<S: Store + 'static>(store: Arc<S>) -> Self {
        Self {
            films: FilmService::new(store.clone(), store.clone(), store.clone(), store.clone()),
            users: UserService::new(store.clone()),
            directors: DirectorService::new(store.clone()),
            friends: FriendshipService::new(store.clone(), store.clone()),
            reference: ReferenceService::new(store),
        }
    }
}
