//! Train search and booking backend.
//!
//! Passengers sign up, log in, search trains by route, book them and list
//! their bookings. A single configured admin maintains the train inventory.
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`]: entities, session identity, errors and the two services.
//! - [`inbound`]: Actix handlers, cookie sessions and error mapping.
//! - [`outbound`]: in-memory and PostgreSQL stores plus notification sinks.
//! - [`middleware`]: request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use middleware::Trace;
