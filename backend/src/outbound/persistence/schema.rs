//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Passenger accounts keyed by the verbatim username.
    users (username) {
        /// Primary key: the username as submitted at signup.
        username -> Text,
        /// Password stored verbatim.
        password -> Text,
    }
}

diesel::table! {
    /// Train inventory. Indexed on `(source, destination)` for route search.
    trains (train_id) {
        /// Primary key: generated identifier.
        train_id -> Text,
        /// Display name.
        name -> Text,
        /// Departure station.
        source -> Text,
        /// Arrival station.
        destination -> Text,
        /// Departure time as entered by the admin.
        departure_time -> Text,
        /// Fare as entered by the admin.
        price -> Text,
    }
}

diesel::table! {
    /// Bookings. No foreign keys: both references may dangle.
    bookings (booking_id) {
        /// Primary key: UUID v4.
        booking_id -> Uuid,
        /// Passenger who booked.
        username -> Text,
        /// Referenced train.
        train_id -> Text,
        /// Booking timestamp.
        booked_at -> Timestamptz,
    }
}
