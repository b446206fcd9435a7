//! In-memory `TrainRepository` with a `(source, destination)` index.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{TrainRepository, TrainRepositoryError};
use crate::domain::{Train, TrainId};

type Route = (String, String);

#[derive(Debug, Default)]
struct TrainTable {
    by_id: BTreeMap<TrainId, Train>,
    by_route: HashMap<Route, BTreeSet<TrainId>>,
}

impl TrainTable {
    fn route_of(train: &Train) -> Route {
        (train.source().to_owned(), train.destination().to_owned())
    }

    fn unindex(&mut self, train: &Train) {
        let route = Self::route_of(train);
        if let Some(ids) = self.by_route.get_mut(&route) {
            ids.remove(train.id());
            if ids.is_empty() {
                self.by_route.remove(&route);
            }
        }
    }

    fn put(&mut self, train: Train) {
        if let Some(previous) = self.by_id.remove(train.id()) {
            self.unindex(&previous);
        }
        self.by_route
            .entry(Self::route_of(&train))
            .or_default()
            .insert(train.id().clone());
        self.by_id.insert(train.id().clone(), train);
    }
}

/// Trains keyed by identifier, ordered by identifier on listing.
#[derive(Debug, Default)]
pub struct MemoryTrainRepository {
    table: RwLock<TrainTable>,
}

impl MemoryTrainRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrainRepository for MemoryTrainRepository {
    async fn find_by_id(&self, id: &TrainId) -> Result<Option<Train>, TrainRepositoryError> {
        Ok(self.table.read().await.by_id.get(id).cloned())
    }

    async fn upsert(&self, train: &Train) -> Result<(), TrainRepositoryError> {
        self.table.write().await.put(train.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Train>, TrainRepositoryError> {
        Ok(self.table.read().await.by_id.values().cloned().collect())
    }

    async fn find_by_route(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<Train>, TrainRepositoryError> {
        let table = self.table.read().await;
        let route = (source.to_owned(), destination.to_owned());
        let Some(ids) = table.by_route.get(&route) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| table.by_id.get(id).cloned())
            .collect())
    }
}
