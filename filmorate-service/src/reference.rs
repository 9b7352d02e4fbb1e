use std::sync::Arc;

use filmorate_catalog::{Entity, Genre, Rating};
use filmorate_db::ReferenceStorage;

use crate::error::{ServiceError, require};

/// Read-only lookups over the genre and rating tables.
#[derive(Clone)]
pub struct ReferenceService {
    reference: Arc<dyn ReferenceStorage>,
}

impl ReferenceService {
    pub fn new(reference: Arc<dyn ReferenceStorage>) -> Self {
        Self { reference }
    }

    pub fn genre(&self, id: i64) -> Result<Genre, ServiceError> {
        require(self.reference.find_genre(id)?, Entity::Genre, id)
    }

    pub fn genres(&self) -> Result<Vec<Genre>, ServiceError> {
        Ok(self.reference.all_genres()?)
    }

    pub fn rating(&self, id: i64) -> Result<Rating, ServiceError> {
        require(self.reference.find_rating(id)?, Entity::Rating, id)
    }

    pub fn ratings(&self) -> Result<Vec<Rating>, ServiceError> {
        Ok(self.reference.all_ratings()?)
    }
}
