//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`NotificationSink`]) are implemented by
//! outbound adapters. Driving ports ([`PassengerService`], [`AdminService`])
//! are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_service;
mod booking_repository;
mod notification_sink;
mod passenger_service;
mod train_repository;
mod user_repository;

#[cfg(test)]
pub use admin_service::MockAdminService;
pub use admin_service::AdminService;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{NotificationError, NotificationSink};
#[cfg(test)]
pub use passenger_service::MockPassengerService;
pub use passenger_service::PassengerService;
#[cfg(test)]
pub use train_repository::MockTrainRepository;
pub use train_repository::{TrainRepository, TrainRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
