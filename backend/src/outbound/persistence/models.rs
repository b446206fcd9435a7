//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bookings, trains, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub username: String,
    pub password: String,
}

/// Insertable struct for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Row struct for reading from the trains table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trains)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TrainRow {
    pub train_id: String,
    pub name: String,
    pub source: String,
    pub destination: String,
    pub departure_time: String,
    pub price: String,
}

/// Insertable struct for train records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trains)]
pub(crate) struct NewTrainRow<'a> {
    pub train_id: &'a str,
    pub name: &'a str,
    pub source: &'a str,
    pub destination: &'a str,
    pub departure_time: &'a str,
    pub price: &'a str,
}

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub booking_id: Uuid,
    pub username: String,
    pub train_id: String,
    pub booked_at: DateTime<Utc>,
}

/// Insertable struct for booking records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub booking_id: Uuid,
    pub username: &'a str,
    pub train_id: &'a str,
    pub booked_at: DateTime<Utc>,
}
