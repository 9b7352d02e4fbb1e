use std::sync::Arc;

use filmorate_catalog::{Entity, User, validate_user};
use filmorate_db::UserStorage;

use crate::error::{ServiceError, require};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStorage>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStorage>) -> Self {
        Self { users }
    }

    /// Validate and store a new user. A blank name is replaced by the login.
    pub fn add_user(&self, user: &User) -> Result<User, ServiceError> {
        let user = prepare(user)?;
        let created = self.users.create_user(&user)?;
        log::info!("Added user {} ({})", created.id, created.login);
        Ok(created)
    }

    pub fn update_user(&self, user: &User) -> Result<User, ServiceError> {
        let user = prepare(user)?;
        let updated = self.users.update_user(&user)?;
        log::info!("Updated user {}", updated.id);
        Ok(updated)
    }

    pub fn user(&self, id: i64) -> Result<User, ServiceError> {
        require(self.users.find_user(id)?, Entity::User, id)
    }

    pub fn users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.all_users()?)
    }
}

fn prepare(user: &User) -> Result<User, ServiceError> {
    if let Err(e) = validate_user(user) {
        log::warn!("Rejected user '{}': {}", user.login, e);
        return Err(e.into());
    }
    let mut user = user.clone();
    if user.name.trim().is_empty() {
        user.name = user.login.clone();
    }
    Ok(user)
}
