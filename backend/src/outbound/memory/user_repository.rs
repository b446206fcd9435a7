//! In-memory `UserRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, Username};

/// Users keyed by username.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Username, User>>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError> {
        self.users
            .write()
            .await
            .insert(user.username().clone(), user.clone());
        Ok(())
    }

    async fn insert_new(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.username()) {
            return Ok(false);
        }
        users.insert(user.username().clone(), user.clone());
        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|left, right| left.username().cmp(right.username()));
        Ok(users)
    }
}
