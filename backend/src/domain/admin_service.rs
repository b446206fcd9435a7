//! Train inventory administration.
//!
//! A single configured [`AdminCredential`] guards the inventory. Adding a
//! train emits no notification.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::passenger_service::map_train_error;
use crate::domain::ports::{AdminService, TrainRepository};
use crate::domain::{AdminCredential, Error, NewTrain, SessionIdentity, Train, TrainId};

/// Admin use-cases backed by the train repository.
#[derive(Clone)]
pub struct TrainInventoryService {
    trains: Arc<dyn TrainRepository>,
    credential: AdminCredential,
}

impl TrainInventoryService {
    /// Create the service with the credential admins must present.
    pub fn new(trains: Arc<dyn TrainRepository>, credential: AdminCredential) -> Self {
        Self { trains, credential }
    }
}

#[async_trait]
impl AdminService for TrainInventoryService {
    async fn admin_authenticate(
        &self,
        identity: &mut SessionIdentity,
        username: &str,
        password: &str,
    ) -> Result<(), Error> {
        if !self.credential.matches(username, password) {
            warn!("admin login rejected");
            return Err(Error::invalid_credentials("Invalid Admin"));
        }
        info!("admin logged in");
        identity.grant_admin();
        Ok(())
    }

    async fn list_all_trains(&self, identity: &SessionIdentity) -> Result<Vec<Train>, Error> {
        identity.require_admin()?;
        self.trains.list_all().await.map_err(map_train_error)
    }

    async fn add_train(&self, identity: &SessionIdentity, train: NewTrain) -> Result<Train, Error> {
        identity.require_admin()?;
        let train = Train::from_new(TrainId::random(), train);
        self.trains.upsert(&train).await.map_err(map_train_error)?;
        info!(
            train_id = %train.id(),
            source = train.source(),
            destination = train.destination(),
            "train added"
        );
        Ok(train)
    }

    async fn admin_logout(&self, identity: &mut SessionIdentity) {
        if identity.is_admin() {
            info!("admin logged out");
        }
        identity.revoke_admin();
    }
}
