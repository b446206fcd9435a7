//! Port abstraction for passenger account storage.

use async_trait::async_trait;

use crate::domain::{User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Keyed storage for [`User`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Insert or overwrite a user record.
    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Insert a user only when the username is free.
    ///
    /// Returns `false` without writing when the username is already taken.
    async fn insert_new(&self, user: &User) -> Result<bool, UserRepositoryError>;

    /// Every stored user.
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;
}
