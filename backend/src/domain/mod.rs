//! Domain primitives, aggregates and services.
//!
//! Purpose: model passengers, trains and bookings independently of any
//! transport or storage. Inbound adapters reach the domain through the
//! driving ports in [`ports`]; storage and notification adapters implement
//! the driven ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Username, User, LoginCredentials, AdminCredential: identity types.
//! - TrainId, Train, NewTrain: inventory.
//! - BookingId, Booking: reservations.
//! - SessionIdentity: per-request authentication state.
//! - Notification, Notifier: best-effort event messages.
//! - PassengerBookingService, TrainInventoryService: driving port
//!   implementations.

pub mod admin_service;
pub mod auth;
pub mod booking;
pub mod error;
pub mod identity;
pub mod notification;
pub mod passenger_service;
pub mod ports;
pub mod trace_id;
pub mod train;
pub mod user;

pub use self::admin_service::TrainInventoryService;
pub use self::auth::{
    AdminCredential, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, LoginCredentials,
    LoginValidationError,
};
pub use self::booking::{Booking, BookingId, sort_chronologically};
pub use self::error::{Error, ErrorCode};
pub use self::identity::SessionIdentity;
pub use self::notification::{Notification, Notifier};
pub use self::passenger_service::PassengerBookingService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::train::{NewTrain, Train, TrainId, TrainIdValidationError};
pub use self::user::{User, Username, UsernameValidationError};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use railbook::domain::{DomainResult, Error};
///
/// fn guarded() -> DomainResult<()> {
///     Err(Error::login_required())
/// }
/// assert!(guarded().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
