//! Booking model linking a passenger to a train.
//!
//! Neither reference is checked referentially: a booking may name a train
//! that has never been added to the inventory.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{TrainId, Username};

/// Booking identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (used by persistence adapters).
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted booking record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    username: Username,
    train_id: TrainId,
    booked_at: DateTime<Utc>,
}

impl Booking {
    /// Build a booking from its parts.
    pub fn new(
        id: BookingId,
        username: Username,
        train_id: TrainId,
        booked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            train_id,
            booked_at,
        }
    }

    /// Booking identifier.
    pub fn id(&self) -> BookingId {
        self.id
    }

    /// Passenger who made the booking.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Referenced train.
    pub fn train_id(&self) -> &TrainId {
        &self.train_id
    }

    /// Moment the booking was recorded.
    pub fn booked_at(&self) -> DateTime<Utc> {
        self.booked_at
    }
}

/// Sort bookings oldest first, breaking ties by identifier.
pub fn sort_chronologically(bookings: &mut [Booking]) {
    bookings.sort_by(|left, right| {
        left.booked_at
            .cmp(&right.booked_at)
            .then_with(|| left.id.cmp(&right.id))
    });
}
