//! Friendship between users.
//!
//! Adding a friend links both users at once with confirmed edges in each
//! direction; there is no request/accept step. Removing a friend drops
//! both edges.

use std::sync::Arc;

use filmorate_catalog::{Entity, Friendship, User, validate_friendship};
use filmorate_db::{FriendshipStorage, UserStorage};

use crate::error::{ServiceError, require};

#[derive(Clone)]
pub struct FriendshipService {
    friendships: Arc<dyn FriendshipStorage>,
    users: Arc<dyn UserStorage>,
}

impl FriendshipService {
    pub fn new(friendships: Arc<dyn FriendshipStorage>, users: Arc<dyn UserStorage>) -> Self {
        Self { friendships, users }
    }

    /// Make two users friends. Re-adding an existing pair is a no-op.
    pub fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<(), ServiceError> {
        validate_friendship(user_id, friend_id)?;
        self.friendships.add_friendship(user_id, friend_id)?;
        log::info!("Users {} and {} are now friends", user_id, friend_id);
        Ok(())
    }

    /// Unlink two users. Removing a pair that was never linked is a no-op.
    pub fn remove_friend(&self, user_id: i64, friend_id: i64) -> Result<(), ServiceError> {
        self.friendships.remove_friendship(user_id, friend_id)?;
        log::info!("Users {} and {} are no longer friends", user_id, friend_id);
        Ok(())
    }

    /// Confirmed friends of a user, ordered by id.
    pub fn friends(&self, user_id: i64) -> Result<Vec<User>, ServiceError> {
        self.require_user(user_id)?;
        let friends = self.friendships.friends(user_id)?;
        log::debug!("User {} has {} friends", user_id, friends.len());
        Ok(friends)
    }

    /// Users who are friends of both, ordered by id. Neither argument is
    /// ever part of the result, and argument order does not matter.
    pub fn common_friends(&self, user_id: i64, other_id: i64) -> Result<Vec<User>, ServiceError> {
        self.require_user(user_id)?;
        self.require_user(other_id)?;

        let common = self.friendships.common_friends(user_id, other_id)?;
        log::debug!(
            "Users {} and {} share {} friends",
            user_id,
            other_id,
            common.len()
        );
        Ok(common)
    }

    /// The raw outgoing edges of a user, with their status.
    pub fn friendships(&self, user_id: i64) -> Result<Vec<Friendship>, ServiceError> {
        self.require_user(user_id)?;
        Ok(self.friendships.friendships(user_id)?)
    }

    fn require_user(&self, id: i64) -> Result<User, ServiceError> {
        require(self.users.find_user(id)?, Entity::User, id)
    }
}
