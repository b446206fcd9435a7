//! Driving port for passenger use-cases.
//!
//! Inbound adapters call this port with the caller's [`SessionIdentity`];
//! operations that log in or out mutate it and the adapter persists the
//! result back to the client session.

use async_trait::async_trait;

use crate::domain::{Booking, Error, LoginCredentials, SessionIdentity, Train, TrainId};

/// Passenger-facing operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PassengerService: Send + Sync {
    /// Register a new account. Fails with `Conflict` when the name is taken.
    async fn signup(&self, credentials: &LoginCredentials) -> Result<(), Error>;

    /// Check credentials and sign the session in.
    async fn authenticate(
        &self,
        identity: &mut SessionIdentity,
        credentials: &LoginCredentials,
    ) -> Result<(), Error>;

    /// Trains running exactly from `source` to `destination`.
    async fn search_trains(
        &self,
        identity: &SessionIdentity,
        source: &str,
        destination: &str,
    ) -> Result<Vec<Train>, Error>;

    /// Record a booking for the signed-in passenger.
    async fn book_train(
        &self,
        identity: &SessionIdentity,
        train_id: &TrainId,
    ) -> Result<Booking, Error>;

    /// Bookings of the signed-in passenger, oldest first.
    async fn list_my_bookings(&self, identity: &SessionIdentity) -> Result<Vec<Booking>, Error>;

    /// Sign the passenger out. Idempotent.
    async fn logout(&self, identity: &mut SessionIdentity);
}
