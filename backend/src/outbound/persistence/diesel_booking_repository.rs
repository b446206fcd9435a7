//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingId, TrainId, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

/// Diesel-backed implementation of the booking repository port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    map_basic_pool_error(error, BookingRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_basic_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

fn row_to_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    let username = Username::new(row.username).map_err(|err| {
        BookingRepositoryError::query(format!("stored booking username invalid: {err}"))
    })?;
    let train_id = TrainId::new(row.train_id).map_err(|err| {
        BookingRepositoryError::query(format!("stored booking train id invalid: {err}"))
    })?;
    Ok(Booking::new(
        BookingId::from_uuid(row.booking_id),
        username,
        train_id,
        row.booked_at,
    ))
}

fn rows_to_bookings(rows: Vec<BookingRow>) -> Result<Vec<Booking>, BookingRepositoryError> {
    rows.into_iter().map(row_to_booking).collect()
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BookingRow> = bookings::table
            .filter(bookings::booking_id.eq(*id.as_uuid()))
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_booking).transpose()
    }

    async fn upsert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewBookingRow {
            booking_id: *booking.id().as_uuid(),
            username: booking.username().as_str(),
            train_id: booking.train_id().as_str(),
            booked_at: booking.booked_at(),
        };

        diesel::insert_into(bookings::table)
            .values(&row)
            .on_conflict(bookings::booking_id)
            .do_update()
            .set((
                bookings::username.eq(excluded(bookings::username)),
                bookings::train_id.eq(excluded(bookings::train_id)),
                bookings::booked_at.eq(excluded(bookings::booked_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BookingRow> = bookings::table
            .select(BookingRow::as_select())
            .order((bookings::booked_at.asc(), bookings::booking_id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_bookings(rows)
    }

    async fn list_for_user(
        &self,
        username: &Username,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::username.eq(username.as_str()))
            .select(BookingRow::as_select())
            .order((bookings::booked_at.asc(), bookings::booking_id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_bookings(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn dangling_train_ids_survive_the_round_trip() {
        let id = Uuid::new_v4();
        let booking = row_to_booking(BookingRow {
            booking_id: id,
            username: "alice".to_owned(),
            train_id: "never-added".to_owned(),
            booked_at: Utc::now(),
        })
        .expect("valid row");

        assert_eq!(*booking.id().as_uuid(), id);
        assert_eq!(booking.train_id().as_str(), "never-added");
    }

    #[rstest]
    fn blank_username_is_a_query_error() {
        let err = row_to_booking(BookingRow {
            booking_id: Uuid::new_v4(),
            username: String::new(),
            train_id: "t-1".to_owned(),
            booked_at: Utc::now(),
        })
        .expect_err("blank username");
        assert!(matches!(err, BookingRepositoryError::Query { .. }));
    }
}
