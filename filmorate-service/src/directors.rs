use std::sync::Arc;

use filmorate_catalog::{Director, Entity, validate_director};
use filmorate_db::DirectorStorage;

use crate::error::{ServiceError, require};

#[derive(Clone)]
pub struct DirectorService {
    directors: Arc<dyn DirectorStorage>,
}

impl DirectorService {
    pub fn new(directors: Arc<dyn DirectorStorage>) -> Self {
        Self { directors }
    }

    pub fn add_director(&self, director: &Director) -> Result<Director, ServiceError> {
        validate_director(director)?;
        let created = self.directors.create_director(director)?;
        log::info!("Added director {} '{}'", created.id, created.name);
        Ok(created)
    }

    pub fn update_director(&self, director: &Director) -> Result<Director, ServiceError> {
        validate_director(director)?;
        let updated = self.directors.update_director(director)?;
        log::info!("Updated director {}", updated.id);
        Ok(updated)
    }

    pub fn director(&self, id: i64) -> Result<Director, ServiceError> {
        require(self.directors.find_director(id)?, Entity::Director, id)
    }

    pub fn directors(&self) -> Result<Vec<Director>, ServiceError> {
        Ok(self.directors.all_directors()?)
    }

    /// Delete a director. Films keep existing without it.
    pub fn delete_director(&self, id: i64) -> Result<(), ServiceError> {
        self.directors.delete_director(id)?;
        log::info!("Deleted director {}", id);
        Ok(())
    }
}
