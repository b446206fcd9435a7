//! Passenger domain service.
//!
//! Implements [`PassengerService`] over the user, train and booking
//! repositories. The service holds no state between calls; the caller's
//! [`SessionIdentity`] is passed in on every request.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, PassengerService, TrainRepository,
    TrainRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Booking, BookingId, Error, LoginCredentials, Notification, Notifier, SessionIdentity, Train,
    TrainId, User, sort_chronologically,
};

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_train_error(error: TrainRepositoryError) -> Error {
    match error {
        TrainRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("train repository unavailable: {message}"))
        }
        TrainRepositoryError::Query { message } => {
            Error::internal(format!("train repository error: {message}"))
        }
    }
}

fn map_booking_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
    }
}

/// Passenger use-cases backed by repository ports.
#[derive(Clone)]
pub struct PassengerBookingService {
    users: Arc<dyn UserRepository>,
    trains: Arc<dyn TrainRepository>,
    bookings: Arc<dyn BookingRepository>,
    notifier: Notifier,
    clock: Arc<dyn Clock>,
    strict_booking: bool,
}

impl PassengerBookingService {
    /// Create the service. Booking does not check the train exists unless
    /// [`Self::with_strict_booking`] enables it.
    pub fn new(
        users: Arc<dyn UserRepository>,
        trains: Arc<dyn TrainRepository>,
        bookings: Arc<dyn BookingRepository>,
        notifier: Notifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            trains,
            bookings,
            notifier,
            clock,
            strict_booking: false,
        }
    }

    /// Reject bookings that reference unknown trains.
    pub fn with_strict_booking(mut self, strict: bool) -> Self {
        self.strict_booking = strict;
        self
    }

    async fn ensure_train_exists(&self, train_id: &TrainId) -> Result<(), Error> {
        let found = self
            .trains
            .find_by_id(train_id)
            .await
            .map_err(map_train_error)?;
        match found {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("train {train_id} not found"))),
        }
    }
}

#[async_trait]
impl PassengerService for PassengerBookingService {
    async fn signup(&self, credentials: &LoginCredentials) -> Result<(), Error> {
        let user = User::new(credentials.username().clone(), credentials.password());
        let created = self
            .users
            .insert_new(&user)
            .await
            .map_err(map_user_error)?;
        if !created {
            return Err(Error::conflict("User already exists"));
        }

        info!(username = %user.username(), "passenger signed up");
        self.notifier
            .publish(Notification::signup(user.username()))
            .await;
        Ok(())
    }

    async fn authenticate(
        &self,
        identity: &mut SessionIdentity,
        credentials: &LoginCredentials,
    ) -> Result<(), Error> {
        let stored = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?;

        match stored {
            Some(user) if user.password_matches(credentials.password()) => {
                let username = user.username().clone();
                info!(username = %username, "passenger logged in");
                identity.sign_in(username.clone());
                self.notifier.publish(Notification::login(&username)).await;
                Ok(())
            }
            _ => {
                warn!(username = %credentials.username(), "passenger login rejected");
                Err(Error::invalid_credentials("Invalid Login"))
            }
        }
    }

    async fn search_trains(
        &self,
        identity: &SessionIdentity,
        source: &str,
        destination: &str,
    ) -> Result<Vec<Train>, Error> {
        identity.require_user()?;
        self.trains
            .find_by_route(source, destination)
            .await
            .map_err(map_train_error)
    }

    async fn book_train(
        &self,
        identity: &SessionIdentity,
        train_id: &TrainId,
    ) -> Result<Booking, Error> {
        let username = identity.require_user()?;
        if self.strict_booking {
            self.ensure_train_exists(train_id).await?;
        }

        let booking = Booking::new(
            BookingId::random(),
            username.clone(),
            train_id.clone(),
            self.clock.utc(),
        );
        self.bookings
            .upsert(&booking)
            .await
            .map_err(map_booking_error)?;

        info!(
            username = %username,
            train_id = %train_id,
            booking_id = %booking.id(),
            "train booked"
        );
        self.notifier
            .publish(Notification::booking(username, train_id))
            .await;
        Ok(booking)
    }

    async fn list_my_bookings(&self, identity: &SessionIdentity) -> Result<Vec<Booking>, Error> {
        let username = identity.require_user()?;
        let mut bookings = self
            .bookings
            .list_for_user(username)
            .await
            .map_err(map_booking_error)?;
        sort_chronologically(&mut bookings);
        Ok(bookings)
    }

    async fn logout(&self, identity: &mut SessionIdentity) {
        if let Some(username) = identity.current_user() {
            info!(username = %username, "passenger logged out");
        }
        identity.sign_out();
    }
}

#[cfg(test)]
#[path = "passenger_service_tests.rs"]
mod tests;
