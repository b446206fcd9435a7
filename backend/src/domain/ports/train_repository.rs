//! Port abstraction for train inventory storage.

use async_trait::async_trait;

use crate::domain::{Train, TrainId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by train repository adapters.
    pub enum TrainRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "train repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "train repository query failed: {message}",
    }
}

/// Keyed storage for [`Train`] records with a route lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainRepository: Send + Sync {
    /// Fetch a train by identifier.
    async fn find_by_id(&self, id: &TrainId) -> Result<Option<Train>, TrainRepositoryError>;

    /// Insert or overwrite a train record.
    async fn upsert(&self, train: &Train) -> Result<(), TrainRepositoryError>;

    /// Every stored train.
    async fn list_all(&self) -> Result<Vec<Train>, TrainRepositoryError>;

    /// Trains whose source and destination both match exactly.
    ///
    /// Must return the same set as filtering [`TrainRepository::list_all`].
    async fn find_by_route(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<Train>, TrainRepositoryError>;
}
