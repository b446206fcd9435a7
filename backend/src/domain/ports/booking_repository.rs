//! Port abstraction for booking storage.

use async_trait::async_trait;

use crate::domain::{Booking, BookingId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
    }
}

/// Keyed storage for [`Booking`] records with a per-user lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Fetch a booking by identifier.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Insert or overwrite a booking record.
    async fn upsert(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Every stored booking.
    async fn list_all(&self) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Bookings made by `username`, in no particular order.
    async fn list_for_user(
        &self,
        username: &Username,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;
}
