//! Driving port for train inventory administration.

use async_trait::async_trait;

use crate::domain::{Error, NewTrain, SessionIdentity, Train};

/// Admin-facing operations guarded by the admin session flag.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Compare against the configured admin credential and raise the flag.
    async fn admin_authenticate(
        &self,
        identity: &mut SessionIdentity,
        username: &str,
        password: &str,
    ) -> Result<(), Error>;

    /// Full, unfiltered train inventory.
    async fn list_all_trains(&self, identity: &SessionIdentity) -> Result<Vec<Train>, Error>;

    /// Persist a new train under a freshly generated identifier.
    async fn add_train(&self, identity: &SessionIdentity, train: NewTrain) -> Result<Train, Error>;

    /// Drop the admin flag. Idempotent.
    async fn admin_logout(&self, identity: &mut SessionIdentity);
}
